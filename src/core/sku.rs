//! Variant suffix decomposer and SKU analyzer
//!
//! A variant suffix packs up to three orthogonal facts into one short
//! token: a finish letter, a 2-4 letter stone/detail code, and an optional
//! trailing bridge marker. The grammar is ambiguous - the stone tables
//! overlap with the finish letters - so decomposition runs layered
//! strategies in strict priority order, first success wins:
//!
//! 1. finish-first lookahead
//! 2. stone-suffix stripping from the end
//! 3. best-effort prefix fallback
//!
//! When strategies 1 and 2 both succeed with different splits the result
//! is flagged ambiguous for manual review rather than silently trusted.

use thiserror::Error;
use tracing::debug;

use crate::core::codes::{
    self, default_finish, find_finish, find_stone, FinishCode, BRIDGE_MARKER,
};
use crate::entities::product::{Gender, PlatingCategory};

/// Error from suffix decomposition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuffixError {
    /// Token cannot be classified under any strategy; callers fall back
    /// to treating the input as a bare master identifier.
    #[error("unrecognized variant suffix: {token}")]
    Unrecognized {
        /// The offending token
        token: String,
    },
}

/// Decomposed variant suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixParts {
    /// Finish code (default finish when the token carries none)
    pub finish: &'static FinishCode,

    /// Stone/detail code, as written in the token
    pub stone: Option<String>,

    /// Dictionary label for the stone, when recognized
    pub stone_label: Option<&'static str>,

    /// Whether the stone code was found in a dictionary
    ///
    /// False only for the best-effort prefix fallback.
    pub stone_recognized: bool,

    /// Trailing bridge marker present
    pub bridge: bool,

    /// Strategies 1 and 2 disagreed; strategy 1 won but the token should
    /// be queued for manual review.
    pub ambiguous: bool,
}

impl SuffixParts {
    /// Bare default finish - what an absent or unclassifiable suffix
    /// estimates as
    pub fn plain() -> Self {
        Self::bare(default_finish())
    }

    fn bare(finish: &'static FinishCode) -> Self {
        Self {
            finish,
            stone: None,
            stone_label: None,
            stone_recognized: true,
            bridge: false,
            ambiguous: false,
        }
    }

    fn with_stone(finish: &'static FinishCode, stone: &codes::StoneCode, bridge: bool) -> Self {
        Self {
            finish,
            stone: Some(stone.code.to_string()),
            stone_label: Some(stone.label),
            stone_recognized: true,
            bridge,
            ambiguous: false,
        }
    }

    /// Human-readable finish/stone summary
    pub fn description(&self) -> String {
        match (&self.stone, self.stone_label) {
            (Some(_), Some(label)) => format!("{}, {}", self.finish.label, label),
            (Some(code), None) => format!("{}, detail {}", self.finish.label, code),
            (None, _) if self.bridge => format!("{}, bridge variant", self.finish.label),
            (None, _) => self.finish.label.to_string(),
        }
    }

    /// Plating category derived from the finish code
    pub fn plating(&self) -> PlatingCategory {
        self.finish.plating
    }

    fn same_split(&self, other: &SuffixParts) -> bool {
        self.finish.code == other.finish.code && self.stone == other.stone
    }
}

/// Strategy 1: finish-first lookahead
///
/// Commits when the token starts with a known finish letter and the
/// remainder - after optionally stripping a trailing bridge letter - is
/// empty or an exact stone match. Resolves tokens that end-anchored
/// stripping would mis-split.
fn finish_first(token: &str, gender: Option<Gender>) -> Option<SuffixParts> {
    let finish = codes::leading_finish(token)?;
    let rest = &token[finish.code.len()..];

    if rest.is_empty() {
        return Some(SuffixParts::bare(finish));
    }
    if let Some(stone) = find_stone(rest, gender) {
        return Some(SuffixParts::with_stone(finish, stone, false));
    }
    if let Some(inner) = rest.strip_suffix(BRIDGE_MARKER) {
        if inner.is_empty() {
            let mut parts = SuffixParts::bare(finish);
            parts.bridge = true;
            return Some(parts);
        }
        if let Some(stone) = find_stone(inner, gender) {
            return Some(SuffixParts::with_stone(finish, stone, true));
        }
    }
    None
}

/// Strategy 2: stone-suffix stripping from the end
///
/// Strips the longest stone code the token ends with (after optionally
/// peeling a trailing bridge letter); the remainder must exactly equal a
/// known finish code, the empty default included.
fn end_strip(token: &str, gender: Option<Gender>) -> Option<SuffixParts> {
    let candidates = [
        (token, false),
        match token.strip_suffix(BRIDGE_MARKER) {
            Some(inner) if !inner.is_empty() => (inner, true),
            _ => (token, false),
        },
    ];

    for (candidate, bridge) in candidates {
        for stone in codes::stone_tables(gender) {
            if let Some(rest) = candidate.strip_suffix(stone.code) {
                if let Some(finish) = find_finish(rest) {
                    return Some(SuffixParts::with_stone(finish, stone, bridge));
                }
            }
        }
    }
    None
}

/// Strategy 3: best-effort prefix fallback
///
/// Accepts a leading finish letter and keeps the unmatched remainder as a
/// possibly-unrecognized stone code.
fn prefix_fallback(token: &str) -> Option<SuffixParts> {
    let finish = codes::leading_finish(token)?;
    let rest = &token[finish.code.len()..];
    if rest.is_empty() {
        return None;
    }
    Some(SuffixParts {
        finish,
        stone: Some(rest.to_string()),
        stone_label: None,
        stone_recognized: false,
        bridge: false,
        ambiguous: false,
    })
}

/// Decompose a variant suffix into finish, stone, and bridge marker
///
/// An empty token decomposes to the bare default finish. Tokens no
/// strategy can classify return [`SuffixError::Unrecognized`].
pub fn decompose_suffix(token: &str, gender: Option<Gender>) -> Result<SuffixParts, SuffixError> {
    let token = token.trim().to_ascii_uppercase();
    if token.is_empty() {
        return Ok(SuffixParts::bare(default_finish()));
    }

    let second = end_strip(&token, gender);

    if let Some(mut parts) = finish_first(&token, gender) {
        if let Some(other) = &second {
            if !parts.same_split(other) {
                debug!(token = %token, "suffix splits differ between strategies, flagging for review");
                parts.ambiguous = true;
            }
        }
        return Ok(parts);
    }

    if let Some(parts) = second {
        return Ok(parts);
    }

    if let Some(parts) = prefix_fallback(&token) {
        debug!(token = %token, "suffix accepted via prefix fallback, stone unrecognized");
        return Ok(parts);
    }

    Err(SuffixError::Unrecognized { token })
}

/// Result of splitting a full product code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuAnalysis {
    /// Whether the code names a variant of a master product
    pub is_variant: bool,

    /// Master identifier
    pub master: String,

    /// Variant suffix (empty when not a variant)
    pub suffix: String,

    /// Plating category derived from the finish code
    pub plating: PlatingCategory,

    /// Human-readable finish/stone summary
    pub description: String,
}

impl SkuAnalysis {
    fn bare_master(code: &str) -> Self {
        Self {
            is_variant: false,
            master: code.to_string(),
            suffix: String::new(),
            plating: PlatingCategory::Silver,
            description: String::new(),
        }
    }
}

/// Shortest master identifier the analyzer will accept
const MASTER_FLOOR: usize = 3;

/// Split a full product code into master identifier and variant suffix
///
/// Scans candidate split points from the end of the code backward to the
/// master floor, runs the decomposer at each, and keeps the first split
/// that recognizes a finish or stone code - preferring splits whose master
/// ends in a digit. The bridge pattern (finish + bridge letter, no stone)
/// reclassifies the whole code as its own master identifier: it names a
/// structurally distinct manufactured item, not a refinement.
pub fn analyze_sku(code: &str, gender: Option<Gender>) -> SkuAnalysis {
    let code = code.trim().to_ascii_uppercase();
    if !code.is_ascii() || code.len() <= MASTER_FLOOR {
        return SkuAnalysis::bare_master(&code);
    }

    let mut fallback: Option<(String, String, SuffixParts)> = None;

    for split in (MASTER_FLOOR..code.len()).rev() {
        let (master, suffix) = code.split_at(split);
        let Ok(parts) = decompose_suffix(suffix, gender) else {
            continue;
        };
        // A bare default-finish parse recognizes nothing; keep scanning.
        if parts.finish.code.is_empty() && parts.stone.is_none() {
            continue;
        }

        if master.ends_with(|c: char| c.is_ascii_digit()) {
            return build_analysis(master, suffix, parts);
        }
        if fallback.is_none() {
            fallback = Some((master.to_string(), suffix.to_string(), parts));
        }
    }

    match fallback {
        Some((master, suffix, parts)) => build_analysis(&master, &suffix, parts),
        None => SkuAnalysis::bare_master(&code),
    }
}

fn build_analysis(master: &str, suffix: &str, parts: SuffixParts) -> SkuAnalysis {
    // Bridge pattern with no stone: the whole code is its own master.
    if parts.bridge && parts.stone.is_none() {
        return SkuAnalysis {
            is_variant: false,
            master: format!("{}{}", master, suffix),
            suffix: String::new(),
            plating: parts.plating(),
            description: parts.description(),
        };
    }
    SkuAnalysis {
        is_variant: true,
        master: master.to_string(),
        suffix: suffix.to_string(),
        plating: parts.plating(),
        description: parts.description(),
    }
}
