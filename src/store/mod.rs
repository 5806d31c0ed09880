pub mod artifact;
pub mod similarity;

pub use artifact::ModelArtifact;
pub use similarity::SimilarityStore;
