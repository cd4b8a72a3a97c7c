//! Label categories.

/// A closed enumeration of labels where exactly one may be active on a PR.
///
/// `ALL` lists every member; `label` gives the name used by the hosting
/// system. Names are only produced here, so nothing outside the enumeration
/// can reach a label store through the reconciler.
pub trait LabelCategory: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Category name for logs ("size", "type").
    const NAME: &'static str;

    /// Every member of the category.
    const ALL: &'static [Self];

    /// External label name, e.g. `size/XL`.
    fn label(&self) -> &'static str;

    /// External names of the whole category, in declaration order.
    fn all_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.label()).collect()
    }
}
