//! Menu catalog: categories, canonical items, and STT-tolerant lookup
//!
//! Spoken Korean run through STT arrives garbled often enough that exact
//! matching is useless. Every item therefore carries an alias list of common
//! mis-transcriptions, and lookup works on whitespace-stripped, lowercased
//! text via substring containment. Canonical names always win over aliases,
//! and among aliases the longest match wins, so "바닐라라테" resolves to the
//! vanilla latte rather than the plain latte.

pub mod pricing;

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Coffee,
    Ade,
    Tea,
    Dessert,
}

impl Category {
    /// All categories, in menu-board order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Coffee, Self::Ade, Self::Tea, Self::Dessert]
    }

    /// Korean display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Coffee => "커피",
            Self::Ade => "에이드",
            Self::Tea => "차",
            Self::Dessert => "디저트",
        }
    }
}

/// One catalog entry
///
/// `name` and every alias are stored whitespace-free and lowercase so they
/// can be matched directly against normalized utterance text.
#[derive(Debug)]
pub struct MenuItem {
    pub id: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

const COFFEE: &[MenuItem] = &[
    MenuItem {
        id: "COFFEE_AMERICANO",
        name: "아메리카노",
        aliases: &["아아", "아메", "아메리까노", "어메리카노", "americano"],
    },
    MenuItem {
        id: "COFFEE_LATTE",
        name: "카페라떼",
        aliases: &["라떼", "라테", "카페라테", "카폐라떼", "latte"],
    },
    MenuItem {
        id: "COFFEE_VANILLA_LATTE",
        name: "바닐라라떼",
        aliases: &["바닐라라테", "바니라라떼", "바닐라떼"],
    },
    MenuItem {
        id: "COFFEE_CARAMEL_MACCHIATO",
        name: "카라멜마키아토",
        aliases: &["카라멜마끼아또", "카라멜마끼야또", "마키아토", "마끼아또", "카라멜마치아토"],
    },
    MenuItem {
        id: "COFFEE_ESPRESSO",
        name: "에스프레소",
        aliases: &["에스프레쏘", "에쏘", "espresso"],
    },
];

const ADE: &[MenuItem] = &[
    MenuItem {
        id: "ADE_LEMON",
        name: "레몬에이드",
        aliases: &["레모네이드", "레몬애이드", "레몬ade"],
    },
    MenuItem {
        id: "ADE_GRAPEFRUIT",
        name: "자몽에이드",
        aliases: &["자몽애이드", "자몽에이드요", "자몽"],
    },
    MenuItem {
        id: "ADE_GREEN_GRAPE",
        name: "청포도에이드",
        aliases: &["청포도애이드", "청포도"],
    },
];

const TEA: &[MenuItem] = &[
    MenuItem {
        id: "TEA_CHAMOMILE",
        name: "캐모마일티",
        aliases: &["캐모마일", "카모마일", "캐모마일차"],
    },
    MenuItem {
        id: "TEA_EARL_GREY",
        name: "얼그레이티",
        aliases: &["얼그레이", "얼그래이", "얼그레이차"],
    },
    MenuItem {
        id: "TEA_GREEN",
        name: "녹차",
        aliases: &["그린티", "녹차티"],
    },
];

const DESSERT: &[MenuItem] = &[
    MenuItem {
        id: "DESSERT_CHEESECAKE",
        name: "치즈케이크",
        aliases: &["치즈케잌", "치즈케익", "치즈케일"],
    },
    MenuItem {
        id: "DESSERT_CROISSANT",
        name: "크루아상",
        aliases: &["크로와상", "크라상", "쿠루아상"],
    },
    MenuItem {
        id: "DESSERT_MACARON",
        name: "마카롱",
        aliases: &["마까롱", "마카룽"],
    },
];

/// Items for a category, in display order
#[must_use]
pub fn items(category: Category) -> &'static [MenuItem] {
    match category {
        Category::Coffee => COFFEE,
        Category::Ade => ADE,
        Category::Tea => TEA,
        Category::Dessert => DESSERT,
    }
}

/// Find an item by its backend id
#[must_use]
pub fn by_id(menu_id: &str) -> Option<(Category, &'static MenuItem)> {
    Category::all()
        .into_iter()
        .find_map(|cat| items(cat).iter().find(|i| i.id == menu_id).map(|i| (cat, i)))
}

/// Strip whitespace and lowercase Latin letters for matching
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a spoken utterance to a catalog item
///
/// A category hint narrows the search first; on a miss the search widens to
/// the whole catalog before giving up. Canonical names take priority over
/// aliases in both passes.
#[must_use]
pub fn lookup(text: &str, hint: Option<Category>) -> Option<(Category, &'static MenuItem)> {
    let norm = normalize(text);
    if norm.is_empty() {
        return None;
    }

    if let Some(cat) = hint {
        if let Some(found) = find_in(&[cat], &norm) {
            return Some(found);
        }
    }
    find_in(&Category::all(), &norm)
}

/// Shortest alias length, in chars, allowed to match mid-utterance
const MIN_INTERIOR_MATCH: usize = 3;

/// Longest-match scan over canonical names, then aliases
fn find_in(cats: &[Category], norm: &str) -> Option<(Category, &'static MenuItem)> {
    let canonical = scan(cats, norm, |item| std::slice::from_ref(&item.name), false);
    if canonical.is_some() {
        return canonical;
    }
    scan(cats, norm, |item| item.aliases, true)
}

fn scan<F>(
    cats: &[Category],
    norm: &str,
    patterns: F,
    guard_short: bool,
) -> Option<(Category, &'static MenuItem)>
where
    F: Fn(&'static MenuItem) -> &'static [&'static str],
{
    let mut best: Option<(usize, Category, &'static MenuItem)> = None;
    for &cat in cats {
        for item in items(cat) {
            for pat in patterns(item) {
                if pattern_matches(norm, pat, guard_short)
                    && best.is_none_or(|(len, _, _)| pat.len() > len)
                {
                    best = Some((pat.len(), cat, item));
                }
            }
        }
    }
    best.map(|(_, cat, item)| (cat, item))
}

/// Two-character aliases like "아아" show up inside unrelated words often
/// enough that interior containment is reserved for longer patterns. A short
/// alias must open the utterance, or the utterance must be little more than
/// the alias itself.
fn pattern_matches(norm: &str, pat: &str, guard_short: bool) -> bool {
    if !guard_short || pat.chars().count() >= MIN_INTERIOR_MATCH {
        return norm.contains(pat);
    }
    norm.starts_with(pat)
        || (norm.chars().count() <= pat.chars().count() + 3 && norm.contains(pat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_substring_match() {
        let (cat, item) = lookup("아메리카노 한 잔 주세요", None).unwrap();
        assert_eq!(cat, Category::Coffee);
        assert_eq!(item.id, "COFFEE_AMERICANO");
    }

    #[test]
    fn alias_match_tolerates_stt_garble() {
        let (_, item) = lookup("아아 하나요", None).unwrap();
        assert_eq!(item.id, "COFFEE_AMERICANO");

        let (_, item) = lookup("카라멜 마끼아또 주세요", None).unwrap();
        assert_eq!(item.id, "COFFEE_CARAMEL_MACCHIATO");
    }

    #[test]
    fn vanilla_latte_beats_plain_latte() {
        let (_, item) = lookup("바닐라라떼 주세요", None).unwrap();
        assert_eq!(item.id, "COFFEE_VANILLA_LATTE");

        // alias spelling, still the more specific item
        let (_, item) = lookup("바닐라 라테로 할게요", None).unwrap();
        assert_eq!(item.id, "COFFEE_VANILLA_LATTE");

        let (_, item) = lookup("라떼 주세요", None).unwrap();
        assert_eq!(item.id, "COFFEE_LATTE");
    }

    #[test]
    fn whitespace_and_case_insensitive() {
        let (_, item) = lookup("아메 리 카 노", None).unwrap();
        assert_eq!(item.id, "COFFEE_AMERICANO");

        let (_, item) = lookup("Americano please", None).unwrap();
        assert_eq!(item.id, "COFFEE_AMERICANO");
    }

    #[test]
    fn hint_narrows_then_widens() {
        // hit inside the hinted category
        let (cat, item) = lookup("녹차 주세요", Some(Category::Tea)).unwrap();
        assert_eq!(cat, Category::Tea);
        assert_eq!(item.id, "TEA_GREEN");

        // miss inside the hint, found elsewhere
        let (cat, item) = lookup("치즈케이크 주세요", Some(Category::Coffee)).unwrap();
        assert_eq!(cat, Category::Dessert);
        assert_eq!(item.id, "DESSERT_CHEESECAKE");
    }

    #[test]
    fn no_match_returns_none() {
        assert!(lookup("오늘 날씨 좋네요", None).is_none());
        assert!(lookup("", None).is_none());
    }

    #[test]
    fn short_alias_never_fires_mid_utterance() {
        // "으아아" contains "아아" but is not an order
        assert!(lookup("으아아 무슨 말인지", None).is_none());
        assert!(lookup("뭐가 뭔지 하나도 모르겠어요", None).is_none());

        // bare or leading short alias still resolves
        let (_, item) = lookup("아아", None).unwrap();
        assert_eq!(item.id, "COFFEE_AMERICANO");
        let (_, item) = lookup("아메 주세요", None).unwrap();
        assert_eq!(item.id, "COFFEE_AMERICANO");
    }

    #[test]
    fn by_id_round_trips() {
        for cat in Category::all() {
            for item in items(cat) {
                let (found_cat, found) = by_id(item.id).unwrap();
                assert_eq!(found_cat, cat);
                assert_eq!(found.id, item.id);
            }
        }
    }
}
