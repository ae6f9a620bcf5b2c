/// Static game catalog: display metadata and pre-game configuration needs.
///
/// `lookup` is a total match over `GameId`, so adding a variant without an
/// entry is a compile error. `all()` is the curated menu order.

use super::game::GameId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameCatalogEntry {
    pub id: GameId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Needs a difficulty pick before launch.
    pub requires_difficulty: bool,
}

const MEMORY: GameCatalogEntry = GameCatalogEntry {
    id: GameId::Memory,
    title: "لعبة الذاكرة",
    description: "تقوي الذاكرة قصيرة المدى والتركيز.",
    icon: "🧠",
    requires_difficulty: true,
};

const REACTION: GameCatalogEntry = GameCatalogEntry {
    id: GameId::Reaction,
    title: "سرعة الاستجابة",
    description: "تزيد من سرعة الاستجابة وردود الفعل.",
    icon: "⚡",
    requires_difficulty: false,
};

const WORD_SCRAMBLE: GameCatalogEntry = GameCatalogEntry {
    id: GameId::WordScramble,
    title: "تخمين الكلمات",
    description: "تنشط المهارات اللغوية وسرعة التفكير.",
    icon: "🔡",
    requires_difficulty: false,
};

const MATH_CHALLENGE: GameCatalogEntry = GameCatalogEntry {
    id: GameId::MathChallenge,
    title: "تحدي الحساب",
    description: "تحسن القدرة على الحساب الذهني السريع.",
    icon: "🧮",
    requires_difficulty: false,
};

const STROOP_TEST: GameCatalogEntry = GameCatalogEntry {
    id: GameId::StroopTest,
    title: "اختبار ستروب",
    description: "تعزز التركيز لمعالجة المعلومات المتضاربة.",
    icon: "🎨",
    requires_difficulty: false,
};

const FIND_THE_ODD: GameCatalogEntry = GameCatalogEntry {
    id: GameId::FindTheOdd,
    title: "العثور على المختلف",
    description: "تشحذ قوة الملاحظة والانتباه للتفاصيل.",
    icon: "🧐",
    requires_difficulty: false,
};

const WORD_PUZZLE: GameCatalogEntry = GameCatalogEntry {
    id: GameId::WordPuzzle,
    title: "ألغاز الكلمات",
    description: "تطور مهارات حل المشكلات والمفردات.",
    icon: "🧩",
    requires_difficulty: false,
};

const PATTERN_RECOGNITION: GameCatalogEntry = GameCatalogEntry {
    id: GameId::PatternRecognition,
    title: "التعرف على الأنماط",
    description: "تقوي التفكير المنطقي والقدرة على التنبؤ.",
    icon: "✨",
    requires_difficulty: false,
};

const VISUAL_SEARCH: GameCatalogEntry = GameCatalogEntry {
    id: GameId::VisualSearch,
    title: "البحث البصري",
    description: "تحسن الانتباه البصري وسرعة البحث.",
    icon: "🎯",
    requires_difficulty: false,
};

/// Menu order. Curated by hand, not derived from the enum.
static DISPLAY_ORDER: [GameCatalogEntry; 9] = [
    MEMORY,
    REACTION,
    WORD_SCRAMBLE,
    MATH_CHALLENGE,
    STROOP_TEST,
    FIND_THE_ODD,
    WORD_PUZZLE,
    PATTERN_RECOGNITION,
    VISUAL_SEARCH,
];

#[derive(Clone, Copy, Debug, Default)]
pub struct GameCatalog;

impl GameCatalog {
    pub fn lookup(&self, id: GameId) -> &'static GameCatalogEntry {
        match id {
            GameId::Memory => &MEMORY,
            GameId::Reaction => &REACTION,
            GameId::WordScramble => &WORD_SCRAMBLE,
            GameId::MathChallenge => &MATH_CHALLENGE,
            GameId::StroopTest => &STROOP_TEST,
            GameId::FindTheOdd => &FIND_THE_ODD,
            GameId::WordPuzzle => &WORD_PUZZLE,
            GameId::PatternRecognition => &PATTERN_RECOGNITION,
            GameId::VisualSearch => &VISUAL_SEARCH,
        }
    }

    pub fn all(&self) -> &'static [GameCatalogEntry] {
        &DISPLAY_ORDER
    }

    pub fn len(&self) -> usize {
        DISPLAY_ORDER.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_game_listed_once() {
        let catalog = GameCatalog;
        for id in GameId::ALL {
            let hits = catalog.all().iter().filter(|e| e.id == id).count();
            assert_eq!(hits, 1, "{id} listed {hits} times");
        }
        assert_eq!(catalog.len(), GameId::ALL.len());
    }

    #[test]
    fn lookup_agrees_with_menu_order() {
        let catalog = GameCatalog;
        for entry in catalog.all() {
            assert_eq!(catalog.lookup(entry.id), entry);
        }
    }

    #[test]
    fn only_memory_asks_for_difficulty() {
        let catalog = GameCatalog;
        let needing: Vec<GameId> = catalog
            .all()
            .iter()
            .filter(|e| e.requires_difficulty)
            .map(|e| e.id)
            .collect();
        assert_eq!(needing, vec![GameId::Memory]);
    }

    #[test]
    fn menu_starts_with_memory_and_ends_with_visual_search() {
        let all = GameCatalog.all();
        assert_eq!(all[0].id, GameId::Memory);
        assert_eq!(all[8].id, GameId::VisualSearch);
        assert_eq!(all[0].title, "لعبة الذاكرة");
    }
}
