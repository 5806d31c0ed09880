//! Title recommendations backed by a precomputed similarity matrix.
//!
//! A [`store::SimilarityStore`] is loaded once from an offline-built artifact,
//! user input is mapped to a catalog title by [`services::FuzzyResolver`], and
//! [`services::Ranker`] picks the nearest neighbours of that title.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
