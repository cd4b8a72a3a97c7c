//! Classification prompt assembly.

/// Diff characters forwarded to the classifier.
pub const MAX_DIFF_CHARS: usize = 3000;

/// Instruction sent as the system role.
pub const SYSTEM_PROMPT: &str = "You classify pull requests into exactly one type. Respond with ONLY the type label, nothing else.

Types:
- feature: New functionality or capability
- fix: Bug fix or error correction
- docs: Documentation changes only
- refactor: Code restructuring without behavior change
- test: Adding or updating tests only
- chore: Build, CI, dependencies, or maintenance";

/// First `MAX_DIFF_CHARS` characters of `diff`, cut on a char boundary.
pub fn truncate_diff(diff: &str) -> &str {
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        Some((cut, _)) => &diff[..cut],
        None => diff,
    }
}

/// User message: title, then the truncated diff.
pub fn build_user_prompt(title: &str, diff: &str) -> String {
    format!(
        "PR title: {}\n\nDiff (first {} chars):\n{}",
        title,
        MAX_DIFF_CHARS,
        truncate_diff(diff)
    )
}
