/// A catalog title chosen by the fuzzy resolver for some free-text input
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    /// Canonical title as it appears in the catalog
    pub title: String,
    /// Position of the matched entry in catalog order
    pub position: usize,
    /// Match confidence on a 0–100 scale
    pub score: f64,
}

/// One recommended title together with its similarity to the query item
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTitle {
    /// Row of the title in the similarity matrix
    pub index: usize,
    pub title: String,
    pub score: f32,
}
