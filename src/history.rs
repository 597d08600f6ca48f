use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::analysis::LinkAnalysis;

/// Maximum number of retained records; older entries are evicted.
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded list of recent analysis records, most-recent first, persisted as
/// a JSON array.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<LinkAnalysis>,
}

impl History {
    /// Load history from a file. A missing file, a payload that is not a JSON
    /// array, or elements that fail to deserialize all yield an empty history
    /// rather than an error.
    pub fn load(path: &Path) -> History {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return History::default(),
        };

        match serde_json::from_str::<Vec<LinkAnalysis>>(&content) {
            Ok(mut entries) => {
                entries.truncate(HISTORY_CAPACITY);
                info!(
                    action = "load",
                    component = "history",
                    entry_count = entries.len(),
                    file_path = ?path,
                    "Loaded analysis history"
                );
                History { entries }
            }
            Err(e) => {
                warn!(
                    action = "load",
                    component = "history",
                    file_path = ?path,
                    error = %e,
                    "Malformed history file, starting empty"
                );
                History::default()
            }
        }
    }

    /// Prepend a record, evicting the oldest beyond capacity.
    pub fn push(&mut self, analysis: LinkAnalysis) {
        self.entries.insert(0, analysis);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json).with_context(|| format!("Failed to write history to {:?}", path))?;
        info!(
            action = "save",
            component = "history",
            entry_count = self.entries.len(),
            file_path = ?path,
            "Saved analysis history"
        );
        Ok(())
    }

    pub fn entries(&self) -> &[LinkAnalysis] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
