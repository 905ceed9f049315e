//! Finish and stone code dictionaries
//!
//! Static, gender-scoped lookup tables behind the suffix decomposer. The
//! tables are ordered data so match priority (longest code first) stays a
//! reviewable artifact rather than a side effect of scattered conditionals.
//!
//! The two stone tables partially overlap with conflicting meanings:
//! `LA` is lava in the men's line but labradorite in the women's, and the
//! women's table carries both `CO` (coral) and the indivisible `PCO`
//! (pink coral). Gender-unspecified contexts merge both tables.

use crate::entities::product::{Gender, PlatingCategory};

/// A finish (plating/surface treatment) code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishCode {
    /// Code letter; empty string is the default finish
    pub code: &'static str,

    /// Display label
    pub label: &'static str,

    /// Plating category this finish maps to
    pub plating: PlatingCategory,
}

/// A stone / decorative detail code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoneCode {
    /// 2-4 letter code
    pub code: &'static str,

    /// Display label
    pub label: &'static str,
}

/// Trailing letter marking a structurally distinct manufactured variant
pub const BRIDGE_MARKER: char = 'A';

/// Finish codes, default last
pub const FINISH_CODES: &[FinishCode] = &[
    FinishCode {
        code: "X",
        label: "gold plated",
        plating: PlatingCategory::Gold,
    },
    FinishCode {
        code: "H",
        label: "platinum plated",
        plating: PlatingCategory::Platinum,
    },
    FinishCode {
        code: "P",
        label: "rose gold plated",
        plating: PlatingCategory::RoseGold,
    },
    FinishCode {
        code: "D",
        label: "two-tone",
        plating: PlatingCategory::TwoTone,
    },
    FinishCode {
        code: "O",
        label: "oxidized",
        plating: PlatingCategory::Oxidized,
    },
    FinishCode {
        code: "",
        label: "polished silver",
        plating: PlatingCategory::Silver,
    },
];

/// Men's line stone codes, longest first
pub const MEN_STONES: &[StoneCode] = &[
    StoneCode {
        code: "HEM",
        label: "hematite",
    },
    StoneCode {
        code: "TUR",
        label: "turquoise",
    },
    StoneCode {
        code: "ZIR",
        label: "zircon",
    },
    StoneCode {
        code: "ON",
        label: "onyx",
    },
    StoneCode {
        code: "TI",
        label: "tiger eye",
    },
    StoneCode {
        code: "CO",
        label: "cord inlay",
    },
    StoneCode {
        code: "LA",
        label: "lava",
    },
    StoneCode {
        code: "MA",
        label: "malachite",
    },
];

/// Women's line stone codes, longest first
pub const WOMEN_STONES: &[StoneCode] = &[
    StoneCode {
        code: "PCO",
        label: "pink coral",
    },
    StoneCode {
        code: "AME",
        label: "amethyst",
    },
    StoneCode {
        code: "OPA",
        label: "opal",
    },
    StoneCode {
        code: "TUR",
        label: "turquoise",
    },
    StoneCode {
        code: "ZIR",
        label: "zircon",
    },
    StoneCode {
        code: "MOP",
        label: "mother of pearl",
    },
    StoneCode {
        code: "PE",
        label: "pearl",
    },
    StoneCode {
        code: "CO",
        label: "coral",
    },
    StoneCode {
        code: "LA",
        label: "labradorite",
    },
    StoneCode {
        code: "RU",
        label: "ruby",
    },
];

/// Default finish (plain polished silver)
pub fn default_finish() -> &'static FinishCode {
    FINISH_CODES
        .iter()
        .find(|f| f.code.is_empty())
        .unwrap_or(&FINISH_CODES[FINISH_CODES.len() - 1])
}

/// Look up a finish by its exact code (empty code = default finish)
pub fn find_finish(code: &str) -> Option<&'static FinishCode> {
    FINISH_CODES.iter().find(|f| f.code == code)
}

/// Whether a token starts with a known non-default finish letter
pub fn leading_finish(token: &str) -> Option<&'static FinishCode> {
    FINISH_CODES
        .iter()
        .filter(|f| !f.code.is_empty())
        .find(|f| token.starts_with(f.code))
}

/// Stone tables for a gender scope, longest codes first
///
/// Unspecified gender merges both tables; within equal lengths the men's
/// table is consulted first.
pub fn stone_tables(gender: Option<Gender>) -> Vec<&'static StoneCode> {
    let mut stones: Vec<&'static StoneCode> = match gender {
        Some(Gender::Men) => MEN_STONES.iter().collect(),
        Some(Gender::Women) => WOMEN_STONES.iter().collect(),
        None => {
            let mut merged: Vec<&'static StoneCode> = MEN_STONES.iter().collect();
            merged.extend(WOMEN_STONES.iter());
            merged
        }
    };
    stones.sort_by(|a, b| b.code.len().cmp(&a.code.len()));
    stones
}

/// Exact stone-code lookup within a gender scope
pub fn find_stone(code: &str, gender: Option<Gender>) -> Option<&'static StoneCode> {
    stone_tables(gender).into_iter().find(|s| s.code == code)
}
