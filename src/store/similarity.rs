use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::error::LoadError;
use crate::store::ModelArtifact;

/// Immutable in-memory similarity index over the catalog.
///
/// Holds the ordered title list, a title → row lookup and a dense N×N
/// similarity matrix stored row-major. Nothing mutates it after construction,
/// so one instance is shared by reference across all requests.
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    titles: Vec<String>,
    index: HashMap<String, usize>,
    matrix: Vec<f32>,
}

impl SimilarityStore {
    /// Loads and validates the artifact at `path`
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let started = Instant::now();
        let artifact = ModelArtifact::read_from(path)?;
        let store = Self::from_artifact(artifact)?;

        tracing::info!(
            path = %path.display(),
            titles = store.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity model loaded"
        );

        Ok(store)
    }

    /// Builds a store from an already decoded artifact, checking that its
    /// titles, matrix and index agree with one another.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, LoadError> {
        let ModelArtifact {
            titles,
            similarity,
            indices,
        } = artifact;

        let n = titles.len();
        if n == 0 {
            return Err(LoadError::Empty);
        }

        if similarity.len() != n {
            return Err(LoadError::Inconsistent(format!(
                "{} titles but {} matrix rows",
                n,
                similarity.len()
            )));
        }

        let mut matrix = Vec::with_capacity(n * n);
        for (row, scores) in similarity.into_iter().enumerate() {
            if scores.len() != n {
                return Err(LoadError::Inconsistent(format!(
                    "matrix row {} has {} columns, expected {}",
                    row,
                    scores.len(),
                    n
                )));
            }
            if let Some(col) = scores.iter().position(|s| !s.is_finite()) {
                return Err(LoadError::NonFiniteScore { row, col });
            }
            // -0.0 and 0.0 must tie when ranking
            matrix.extend(scores.into_iter().map(|s| if s == 0.0 { 0.0 } else { s }));
        }

        let index = match indices {
            Some(indices) => validate_index(&titles, indices)?,
            None => build_index(&titles),
        };

        Ok(Self {
            titles,
            index,
            matrix,
        })
    }

    /// Number of catalog items
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// The catalog in matrix order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn title_at(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.index.get(title).copied()
    }

    /// Scores of every other item against `index`, in catalog order.
    ///
    /// The self-pair is never yielded. An out-of-range index yields nothing.
    pub fn similarities_of(&self, index: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let n = self.len();
        let row: &[f32] = if index < n {
            &self.matrix[index * n..(index + 1) * n]
        } else {
            &[]
        };

        row.iter()
            .copied()
            .enumerate()
            .filter(move |&(other, _)| other != index)
    }
}

/// Title → row map where a repeated title resolves to its last occurrence.
fn build_index(titles: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(titles.len());
    for (i, title) in titles.iter().enumerate() {
        if let Some(previous) = index.insert(title.clone(), i) {
            tracing::warn!(title = %title, previous, replaced_by = i, "Duplicate title in catalog");
        }
    }
    index
}

fn validate_index(
    titles: &[String],
    indices: HashMap<String, usize>,
) -> Result<HashMap<String, usize>, LoadError> {
    for (title, &i) in &indices {
        match titles.get(i) {
            Some(at) if at == title => {}
            Some(at) => {
                return Err(LoadError::Inconsistent(format!(
                    "index maps '{}' to row {} which holds '{}'",
                    title, i, at
                )))
            }
            None => {
                return Err(LoadError::Inconsistent(format!(
                    "index maps '{}' to row {} but catalog has {} titles",
                    title,
                    i,
                    titles.len()
                )))
            }
        }
    }

    if let Some(missing) = titles.iter().find(|t| !indices.contains_key(*t)) {
        return Err(LoadError::Inconsistent(format!(
            "title '{}' has no index entry",
            missing
        )));
    }

    Ok(indices)
}
