use serde::{Deserialize, Serialize};

use crate::foundation::error::{VizError, VizResult};
use crate::github::model::PullRequestSnapshot;
use crate::github::url::parse_pr_url;
use crate::storage::kv::KeyValueStore;

pub const HISTORY_KEY: &str = "prVisualizationHistory";
pub const MAX_HISTORY_ITEMS: usize = 10;

/// One successfully visualized PR, most recent first in the stored list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// PR number as a string.
    pub id: String,
    pub title: String,
    /// The URL as submitted, used as the de-duplication key.
    pub pr_url: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// `owner/repo`.
    pub repo_name: String,
}

impl HistoryEntry {
    pub fn from_snapshot(pr_url: &str, snapshot: &PullRequestSnapshot, timestamp: i64) -> Self {
        Self {
            id: snapshot.number.to_string(),
            title: snapshot.title.clone(),
            pr_url: pr_url.to_owned(),
            timestamp,
            repo_name: repo_name_for(pr_url, snapshot),
        }
    }
}

/// Base repository full name when known, else the `owner/repo` path segments of the URL.
pub fn repo_name_for(pr_url: &str, snapshot: &PullRequestSnapshot) -> String {
    if let Some(name) = snapshot.repo_full_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_owned();
    }
    if let Ok(loc) = parse_pr_url(pr_url) {
        return loc.repo_name();
    }
    pr_url
        .split('/')
        .skip(3)
        .take(2)
        .collect::<Vec<_>>()
        .join("/")
}

/// History list kept under [`HISTORY_KEY`].
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored entries, newest first. A missing key is an empty history.
    pub fn entries(&self) -> VizResult<Vec<HistoryEntry>> {
        match self.store.get(HISTORY_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| VizError::storage(format!("history is not valid JSON: {e}"))),
        }
    }

    /// Puts `entry` at the front, dropping any older entry with the same URL and anything past
    /// [`MAX_HISTORY_ITEMS`]. Returns the updated list.
    pub fn record(&mut self, entry: HistoryEntry) -> VizResult<Vec<HistoryEntry>> {
        let mut history = self.entries().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable history");
            Vec::new()
        });
        history.retain(|e| e.pr_url != entry.pr_url);
        history.insert(0, entry);
        history.truncate(MAX_HISTORY_ITEMS);

        self.store.set(HISTORY_KEY, serde_json::to_string(&history)?)?;
        Ok(history)
    }

    pub fn clear(&mut self) -> VizResult<()> {
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/history.rs"]
mod tests;
