use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Offline-built recommender model as it is stored on disk.
///
/// The three parts must agree in size: `titles` defines the row/column order
/// of `similarity`, and `indices` (when present) maps each title back to its row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelArtifact {
    pub titles: Vec<String>,
    pub similarity: Vec<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<HashMap<String, usize>>,
}

impl ModelArtifact {
    /// Reads an artifact from disk, transparently handling gzip compression.
    pub fn read_from(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::Missing {
                path: path.to_path_buf(),
            });
        }

        let mut bytes = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Decodes an artifact from raw (possibly gzip-compressed) JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        if is_gzip(bytes) {
            // A damaged gzip stream is a corrupt artifact, not an I/O failure.
            let mut json = Vec::new();
            GzDecoder::new(bytes)
                .read_to_end(&mut json)
                .map_err(|e| LoadError::Corrupt(format!("invalid gzip stream: {}", e)))?;
            decode_json(&json)
        } else {
            decode_json(bytes)
        }
    }

    /// Writes the artifact as JSON, gzip-compressed when `compressed` is set.
    pub fn write_to(&self, path: &Path, compressed: bool) -> Result<(), LoadError> {
        let writer = BufWriter::new(File::create(path)?);

        if compressed {
            let mut encoder = GzEncoder::new(writer, Compression::new(3));
            serde_json::to_writer(&mut encoder, self).map_err(std::io::Error::from)?;
            encoder.finish()?.flush()?;
        } else {
            let mut writer = writer;
            serde_json::to_writer(&mut writer, self).map_err(std::io::Error::from)?;
            writer.flush()?;
        }

        Ok(())
    }

    /// Number of titles in the catalog
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

fn decode_json(bytes: &[u8]) -> Result<ModelArtifact, LoadError> {
    serde_json::from_slice(bytes).map_err(|e| LoadError::Corrupt(e.to_string()))
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}
