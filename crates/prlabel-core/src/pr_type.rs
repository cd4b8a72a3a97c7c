//! PR type labels and normalization of classifier output.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::category::LabelCategory;

/// Namespace prefix of type labels on the host.
const TYPE_PREFIX: &str = "type/";

/// Kind of change a PR makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeLabel {
    #[serde(rename = "type/feature")]
    Feature,
    #[serde(rename = "type/fix")]
    Fix,
    #[serde(rename = "type/docs")]
    Docs,
    #[serde(rename = "type/refactor")]
    Refactor,
    #[serde(rename = "type/test")]
    Test,
    #[serde(rename = "type/chore")]
    Chore,
}

impl TypeLabel {
    /// Label used when classifier output matches nothing.
    pub const DEFAULT: TypeLabel = TypeLabel::Chore;

    /// Bare name without the `type/` namespace.
    pub fn name(&self) -> &'static str {
        &self.label()[TYPE_PREFIX.len()..]
    }
}

impl LabelCategory for TypeLabel {
    const NAME: &'static str = "type";

    const ALL: &'static [Self] = &[
        TypeLabel::Feature,
        TypeLabel::Fix,
        TypeLabel::Docs,
        TypeLabel::Refactor,
        TypeLabel::Test,
        TypeLabel::Chore,
    ];

    fn label(&self) -> &'static str {
        match self {
            TypeLabel::Feature => "type/feature",
            TypeLabel::Fix => "type/fix",
            TypeLabel::Docs => "type/docs",
            TypeLabel::Refactor => "type/refactor",
            TypeLabel::Test => "type/test",
            TypeLabel::Chore => "type/chore",
        }
    }
}

impl std::fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parse of a bare name (`fix`) or label (`type/fix`).
impl FromStr for TypeLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bare = s.strip_prefix(TYPE_PREFIX).unwrap_or(s);
        TypeLabel::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == bare)
            .ok_or_else(|| format!("unknown PR type: {}", s))
    }
}

/// Map raw classifier text to a type label. Never fails.
///
/// Whitespace is trimmed, case folded and one leading `type/` removed; the rest
/// must equal a bare name exactly. Anything else, including the empty string or
/// an answer with trailing explanation, yields [`TypeLabel::DEFAULT`].
pub fn normalize_type(raw: &str) -> TypeLabel {
    let lowered = raw.trim().to_lowercase();
    let bare = lowered.strip_prefix(TYPE_PREFIX).unwrap_or(&lowered).trim();
    TypeLabel::ALL
        .iter()
        .copied()
        .find(|kind| kind.name() == bare)
        .unwrap_or(TypeLabel::DEFAULT)
}
