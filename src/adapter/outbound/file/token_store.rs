//! JSON flat-file token store.
//!
//! The file holds a single JSON array of token strings. Writes go through a
//! temp file and a rename so a crash mid-write never leaves a truncated
//! array behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::{AdToken, SeenTokens};
use crate::error::Result;
use crate::port::TokenStore;

/// Token store backed by one JSON file.
pub struct JsonFileTokenStore {
    path: PathBuf,
}

impl JsonFileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for JsonFileTokenStore {
    fn load(&self) -> Result<SeenTokens> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Token file not found, starting empty");
                return Ok(SeenTokens::new());
            }
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(SeenTokens::new());
        }

        let raw: Vec<String> = serde_json::from_str(&content)?;
        let tokens = raw
            .into_iter()
            .filter_map(|raw| match AdToken::try_new(raw) {
                Ok(token) => Some(token),
                Err(err) => {
                    warn!(path = %self.path.display(), error = %err, "Ignoring stored token");
                    None
                }
            })
            .collect();

        Ok(tokens)
    }

    fn save(&self, tokens: &SeenTokens) -> Result<()> {
        let json = serde_json::to_string(&tokens.to_sorted_vec())?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;

        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        debug!(path = %self.path.display(), count = tokens.len(), "Saved tokens");
        Ok(())
    }
}
