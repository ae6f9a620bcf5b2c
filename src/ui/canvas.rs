/// Cell grid the renderer diffs against the previous frame.
///
/// Games and screens draw into a `Canvas`; the renderer owns two of them
/// (front/back) and only emits terminal commands for cells that changed.
///
/// Glyph widths:
///   - Emoji and other pictographs take 2 columns (`wide` + continuation cell)
///   - Combining marks (Arabic harakat, variation selectors, ZWJ) take 0
///     columns and are appended to the previous cell's bytes
///   - Everything else takes 1 column

use crossterm::style::Color;

/// Shared colours. Warm, high-contrast, large-print friendly.
pub mod palette {
    use crossterm::style::Color;

    pub const BASE_BG: Color = Color::Rgb { r: 28, g: 24, b: 20 };
    pub const HEADER_BG: Color = Color::Rgb { r: 16, g: 94, b: 90 };
    pub const CARD_BG: Color = Color::Rgb { r: 48, g: 40, b: 32 };
    pub const CURSOR_BG: Color = Color::Rgb { r: 22, g: 120, b: 110 };
    pub const TEXT: Color = Color::Rgb { r: 250, g: 243, b: 224 };
    pub const DIM: Color = Color::Rgb { r: 160, g: 150, b: 130 };
    pub const ACCENT: Color = Color::Rgb { r: 255, g: 200, b: 60 };
    pub const GOOD: Color = Color::Rgb { r: 110, g: 230, b: 120 };
    pub const BAD: Color = Color::Rgb { r: 255, g: 110, b: 100 };
    pub const HINT: Color = Color::Rgb { r: 120, g: 200, b: 255 };
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    ch: [u8; 16],
    ch_len: u8,
    pub fg: Color,
    pub bg: Color,
    pub wide: bool,
    pub cont: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: [b' ', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ch_len: 1,
        fg: palette::TEXT,
        bg: palette::BASE_BG,
        wide: false,
        cont: false,
    };

    const WIDE_CONT: Cell = Cell {
        ch: [0; 16],
        ch_len: 0,
        fg: palette::TEXT,
        bg: palette::BASE_BG,
        wide: false,
        cont: true,
    };

    /// Never equal to a drawn cell; fills the back buffer to force a repaint.
    pub const INVALID: Cell = Cell {
        ch: [b'?', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ch_len: 1,
        fg: Color::Magenta,
        bg: Color::Magenta,
        wide: false,
        cont: false,
    };

    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => palette::BASE_BG,
            other => other,
        }
    }

    fn from_char(c: char, fg: Color, bg: Color, wide: bool) -> Self {
        let mut cell = Self::BLANK;
        let len = c.encode_utf8(&mut cell.ch).len() as u8;
        cell.ch_len = len;
        cell.fg = fg;
        cell.bg = Self::norm_bg(bg);
        cell.wide = wide;
        cell
    }

    /// Attach a zero-width char. Dropped when the cell is full.
    fn push_mark(&mut self, c: char) {
        let start = self.ch_len as usize;
        if start + c.len_utf8() <= self.ch.len() {
            let len = c.encode_utf8(&mut self.ch[start..]).len();
            self.ch_len += len as u8;
        }
    }

    pub fn as_str(&self) -> &str {
        // Only whole chars are ever written into `ch`.
        std::str::from_utf8(&self.ch[..self.ch_len as usize]).unwrap_or("")
    }
}

/// Terminal columns taken by one char.
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if is_zero_width(cp) {
        0
    } else if is_wide(cp) {
        2
    } else {
        1
    }
}

/// Terminal columns taken by a string.
pub fn text_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Longest prefix of `s` that fits in `width` columns, marks included.
pub fn clip(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        used += char_width(ch);
        if used > width {
            return &s[..i];
        }
    }
    s
}

fn is_zero_width(cp: u32) -> bool {
    matches!(cp,
        0x0300..=0x036F      // combining diacritics
        | 0x0610..=0x061A    // Arabic signs
        | 0x064B..=0x065F    // harakat
        | 0x0670
        | 0x06D6..=0x06ED
        | 0x200B..=0x200F    // zero-width space/joiners, bidi marks
        | 0xFE00..=0xFE0F    // variation selectors
    )
}

fn is_wide(cp: u32) -> bool {
    matches!(cp,
        0x1100..=0x115F
        | 0x2600..=0x27BF    // misc symbols, dingbats
        | 0x2B50..=0x2B55
        | 0x3000..=0x303E
        | 0xFF01..=0xFF60
        | 0x1F300..=0x1F64F  // pictographs, emoticons
        | 0x1F680..=0x1F6FF
        | 0x1F7E0..=0x1F7EB  // coloured circles and squares
        | 0x1F900..=0x1FAFF
    )
}

/// A rectangle of the canvas, in terminal cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Area {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Area {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Area { x, y, w, h }
    }

    /// Left column that centres `width` columns in this area.
    pub fn center_x(&self, width: usize) -> usize {
        self.x + self.w.saturating_sub(width) / 2
    }

    pub fn bottom(&self) -> usize {
        self.y + self.h
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Canvas { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn full(&self) -> Area {
        Area::new(0, 0, self.width, self.height)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write `s` at (x, y). Returns the column after the last glyph.
    pub fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) -> usize {
        let mut cx = x;
        let mut last: Option<usize> = None;
        for ch in s.chars() {
            match char_width(ch) {
                0 => {
                    if let Some(lx) = last {
                        if y < self.height {
                            let idx = y * self.width + lx;
                            self.cells[idx].push_mark(ch);
                        }
                    }
                }
                2 => {
                    if cx + 1 >= self.width {
                        break;
                    }
                    self.set(cx, y, Cell::from_char(ch, fg, bg, true));
                    let mut cont = Cell::WIDE_CONT;
                    cont.bg = Cell::norm_bg(bg);
                    self.set(cx + 1, y, cont);
                    last = Some(cx);
                    cx += 2;
                }
                _ => {
                    if cx >= self.width {
                        break;
                    }
                    self.set(cx, y, Cell::from_char(ch, fg, bg, false));
                    last = Some(cx);
                    cx += 1;
                }
            }
        }
        cx
    }

    /// Write `s` horizontally centred in `area` on row `y`.
    pub fn put_centered(&mut self, area: Area, y: usize, s: &str, fg: Color, bg: Color) {
        let x = area.center_x(text_width(s));
        self.put_str(x, y, s, fg, bg);
    }

    pub fn fill(&mut self, area: Area, bg: Color) {
        let blank = Cell::from_char(' ', palette::TEXT, bg, false);
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..(area.x + area.w).min(self.width) {
                self.set(x, y, blank);
            }
        }
    }

    /// Text of row `y`, continuation cells skipped.
    #[cfg(test)]
    pub fn row_text(&self, y: usize) -> String {
        (0..self.width)
            .map(|x| self.get(x, y))
            .filter(|c| !c.cont)
            .map(|c| c.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(text_width("abc"), 3);
        assert_eq!(text_width("🧠"), 2);
        assert_eq!(text_width("صُنع"), 3);
        assert_eq!(text_width("❤️"), 2);
    }

    #[test]
    fn wide_glyph_takes_two_cells() {
        let mut c = Canvas::new(10, 1);
        let end = c.put_str(0, 0, "🧠x", palette::TEXT, Color::Reset);
        assert_eq!(end, 3);
        assert!(c.get(0, 0).wide);
        assert!(c.get(1, 0).cont);
        assert_eq!(c.get(2, 0).as_str(), "x");
    }

    #[test]
    fn marks_join_previous_cell() {
        let mut c = Canvas::new(10, 1);
        c.put_str(0, 0, "صُ", palette::TEXT, Color::Reset);
        assert_eq!(c.get(0, 0).as_str(), "صُ");
        assert_eq!(c.get(1, 0).as_str(), " ");
    }

    #[test]
    fn clipped_at_edge() {
        let mut c = Canvas::new(3, 1);
        c.put_str(1, 0, "abcd", palette::TEXT, Color::Reset);
        assert_eq!(c.row_text(0), " ab");
        c.put_str(2, 0, "🎯", palette::TEXT, Color::Reset);
        assert_eq!(c.get(2, 0).as_str(), "b");
    }

    #[test]
    fn clip_respects_wide_glyphs() {
        assert_eq!(clip("abc", 2), "ab");
        assert_eq!(clip("a🧠b", 2), "a");
        assert_eq!(clip("a🧠b", 3), "a🧠");
        assert_eq!(clip("صُنع", 1), "صُ");
        assert_eq!(clip("ok", 10), "ok");
    }

    #[test]
    fn centered_text() {
        let mut c = Canvas::new(10, 1);
        c.put_centered(c.full(), 0, "ab", palette::TEXT, Color::Reset);
        assert_eq!(c.row_text(0), "    ab    ");
    }
}
