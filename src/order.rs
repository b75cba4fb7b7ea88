//! Shared order vocabulary: the typed values slots can take
//!
//! These enums serialize snake_case so the backend payload and the state
//! snapshot use stable ids ("ice", "tall", "card") while all user-facing
//! text stays Korean.

use serde::{Deserialize, Serialize};

use crate::menu::Category;

/// Takeout vs dine-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DineType {
    Takeout,
    DineIn,
}

impl DineType {
    /// Korean display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Takeout => "포장",
            Self::DineIn => "매장",
        }
    }
}

/// Drink temperature; applies to coffee and tea only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temp {
    Hot,
    Ice,
}

impl Temp {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "따뜻한",
            Self::Ice => "아이스",
        }
    }
}

/// Cup size; desserts skip it entirely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Tall,
    Grande,
    Venti,
}

impl Size {
    /// Stable id used in the payload and the price table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tall => "tall",
            Self::Grande => "grande",
            Self::Venti => "venti",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tall => "톨",
            Self::Grande => "그란데",
            Self::Venti => "벤티",
        }
    }
}

/// Ade sweetness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sweetness {
    Low,
    Normal,
    High,
}

impl Sweetness {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "덜 달게",
            Self::Normal => "보통 당도",
            Self::High => "더 달게",
        }
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    MobilePay,
    Coupon,
}

impl PaymentMethod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "카드",
            Self::Cash => "현금",
            Self::MobilePay => "앱 결제",
            Self::Coupon => "쿠폰",
        }
    }
}

/// Per-item option bundle
///
/// Fields irrelevant to the current category stay at their defaults and are
/// ignored: `extra_shot`/`syrup`/`decaf` are coffee-only, `sweetness` is
/// ade-only. Merging is field-wise, latest utterance wins only for fields
/// the new utterance actually set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionBundle {
    #[serde(default)]
    pub extra_shot: u8,
    #[serde(default)]
    pub syrup: bool,
    #[serde(default)]
    pub decaf: Option<bool>,
    #[serde(default)]
    pub sweetness: Option<Sweetness>,
}

impl OptionBundle {
    /// Merge `newer` into `self`, keeping fields the newer turn left unset
    pub fn merge(&mut self, newer: &Self) {
        if newer.extra_shot > 0 {
            self.extra_shot = newer.extra_shot;
        }
        if newer.syrup {
            self.syrup = true;
        }
        if newer.decaf.is_some() {
            self.decaf = newer.decaf;
        }
        if newer.sweetness.is_some() {
            self.sweetness = newer.sweetness;
        }
    }

    /// True when no option has been set at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One committed cart line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub category: Category,
    pub menu_id: String,
    pub menu_name: String,
    pub temp: Option<Temp>,
    pub size: Option<Size>,
    pub options: OptionBundle,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_earlier_fields() {
        let mut opts = OptionBundle {
            decaf: Some(true),
            ..OptionBundle::default()
        };
        let newer = OptionBundle {
            extra_shot: 1,
            ..OptionBundle::default()
        };
        opts.merge(&newer);
        assert_eq!(opts.decaf, Some(true));
        assert_eq!(opts.extra_shot, 1);
    }

    #[test]
    fn merge_latest_wins_for_conflicting_field() {
        let mut opts = OptionBundle {
            sweetness: Some(Sweetness::Low),
            ..OptionBundle::default()
        };
        let newer = OptionBundle {
            sweetness: Some(Sweetness::High),
            ..OptionBundle::default()
        };
        opts.merge(&newer);
        assert_eq!(opts.sweetness, Some(Sweetness::High));
    }

    #[test]
    fn merge_never_clears_decaf() {
        let mut opts = OptionBundle {
            decaf: Some(true),
            ..OptionBundle::default()
        };
        opts.merge(&OptionBundle::default());
        assert_eq!(opts.decaf, Some(true));
    }

    #[test]
    fn snake_case_ids() {
        assert_eq!(serde_json::to_string(&Temp::Ice).unwrap(), "\"ice\"");
        assert_eq!(serde_json::to_string(&Size::Tall).unwrap(), "\"tall\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::MobilePay).unwrap(),
            "\"mobile_pay\""
        );
    }
}
