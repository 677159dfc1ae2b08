use std::path::Path;

use thiserror::Error;

mod entry;
mod source;

pub use entry::{Accent, Pronunciation, VocabularyEntry};

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to fetch vocabulary data: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("vocabulary data request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to read vocabulary data: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to decode vocabulary data: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("no vocabulary words found in the file")]
    Empty,
}

/// Handle to the vocabulary data source. The list is fetched exactly once
/// at startup; entries are read-only afterwards.
pub struct Vocabulary {
    client: reqwest::Client,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Loads the word list from `location`, a URL or a local file path.
    pub async fn load(&self, location: &str) -> Result<Vec<VocabularyEntry>, VocabularyError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            source::fetch_entries(&self.client, location).await
        } else {
            source::read_entries(Path::new(location))
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
