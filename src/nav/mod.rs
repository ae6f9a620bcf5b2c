pub mod controller;
pub mod event;
pub mod host;
pub mod session;
pub mod sound;
