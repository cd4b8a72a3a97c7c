//! Size buckets from line-change volume.

use serde::{Deserialize, Serialize};

use crate::category::LabelCategory;

/// Size bucket, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeLabel {
    #[serde(rename = "size/XS")]
    XS,
    #[serde(rename = "size/S")]
    S,
    #[serde(rename = "size/M")]
    M,
    #[serde(rename = "size/L")]
    L,
    #[serde(rename = "size/XL")]
    XL,
    #[serde(rename = "size/XXL")]
    XXL,
}

impl LabelCategory for SizeLabel {
    const NAME: &'static str = "size";

    const ALL: &'static [Self] = &[
        SizeLabel::XS,
        SizeLabel::S,
        SizeLabel::M,
        SizeLabel::L,
        SizeLabel::XL,
        SizeLabel::XXL,
    ];

    fn label(&self) -> &'static str {
        match self {
            SizeLabel::XS => "size/XS",
            SizeLabel::S => "size/S",
            SizeLabel::M => "size/M",
            SizeLabel::L => "size/L",
            SizeLabel::XL => "size/XL",
            SizeLabel::XXL => "size/XXL",
        }
    }
}

impl std::fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lines added and deleted by a PR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeVolume {
    pub additions: u64,
    pub deletions: u64,
}

impl ChangeVolume {
    pub fn new(additions: u64, deletions: u64) -> Self {
        Self {
            additions,
            deletions,
        }
    }

    /// Total changed lines, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }

    pub fn size(&self) -> SizeLabel {
        bucket(self.total())
    }
}

/// Map a change volume to its size bucket.
///
/// Buckets are half-open on `additions + deletions`:
/// `[0,10)` XS, `[10,50)` S, `[50,200)` M, `[200,500)` L, `[500,1000)` XL,
/// `[1000,∞)` XXL. Counts are unsigned, so negative input cannot be expressed.
pub fn classify_size(additions: u64, deletions: u64) -> SizeLabel {
    ChangeVolume::new(additions, deletions).size()
}

fn bucket(total: u64) -> SizeLabel {
    match total {
        0..=9 => SizeLabel::XS,
        10..=49 => SizeLabel::S,
        50..=199 => SizeLabel::M,
        200..=499 => SizeLabel::L,
        500..=999 => SizeLabel::XL,
        _ => SizeLabel::XXL,
    }
}
