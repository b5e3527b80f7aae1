//! CRUD intents and proposed action candidates.

use crate::dataset::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The four operation kinds a proposal can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Create,
    Read,
    Update,
    Delete,
}

impl Intent {
    pub const ALL: [Intent; 4] = [Intent::Create, Intent::Read, Intent::Update, Intent::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Create => "create",
            Intent::Read => "read",
            Intent::Update => "update",
            Intent::Delete => "delete",
        }
    }

    /// Uppercase verb for human-readable summaries ("READ accounts ...").
    pub fn verb(&self) -> &'static str {
        match self {
            Intent::Create => "CREATE",
            Intent::Read => "READ",
            Intent::Update => "UPDATE",
            Intent::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved filter value came from: the collection, field and
/// literal text that matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub collection: String,
    pub field: String,
    pub value: String,
}

/// A proposed CRUD operation with a confidence score and provenance.
///
/// Candidates are value objects: two candidates with the same fields are
/// the same proposal. `filter` is an equality conjunction (every key must
/// match); `patch` carries fields for create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCandidate {
    pub intent: Intent,
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Record>,
    pub score: f32,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_from: Option<Provenance>,
}

impl ActionCandidate {
    /// Create a bare candidate (no filter, no patch).
    pub fn new(intent: Intent, collection: impl Into<String>, score: f32) -> Self {
        let collection = collection.into();
        let summary = format!("{} {}", intent.verb(), collection);
        Self {
            intent,
            collection,
            filter: None,
            patch: None,
            score,
            summary,
            resolved_from: None,
        }
    }

    /// Add an equality condition to the filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filter
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), value);
        self
    }

    /// Attach a patch (fields for create/update).
    pub fn with_patch(mut self, patch: Record) -> Self {
        self.patch = Some(patch);
        self
    }

    /// Record where the filter value was resolved from.
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.resolved_from = Some(provenance);
        self
    }

    /// Replace the human-readable summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Identity for deduplication: intent, collection, and the canonical
    /// JSON of the filter (absent filters collapse to `{}`). Score,
    /// summary and provenance are deliberately excluded.
    pub fn dedup_key(&self) -> String {
        let filter = self
            .filter
            .as_ref()
            .and_then(|f| serde_json::to_string(f).ok())
            .unwrap_or_else(|| "{}".to_string());
        format!("{}|{}|{}", self.intent.as_str(), self.collection, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn intent_round_trips_through_serde() {
        for intent in Intent::ALL {
            let text = serde_json::to_string(&intent).unwrap();
            let back: Intent = serde_json::from_str(&text).unwrap();
            assert_eq!(intent, back);
        }
        assert_eq!(serde_json::to_string(&Intent::Read).unwrap(), "\"read\"");
    }

    #[test]
    fn dedup_key_ignores_score_and_summary() {
        let a = ActionCandidate::new(Intent::Read, "accounts", 0.9)
            .with_filter("bank", json!("HDFC"));
        let b = ActionCandidate::new(Intent::Read, "accounts", 0.1)
            .with_filter("bank", json!("HDFC"))
            .with_summary("something else");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_distinguishes_filters() {
        let base = ActionCandidate::new(Intent::Read, "accounts", 0.5);
        let filtered = base.clone().with_filter("bank", json!("HDFC"));
        assert_ne!(base.dedup_key(), filtered.dedup_key());
    }

    #[test]
    fn filter_keys_are_ordered() {
        let c = ActionCandidate::new(Intent::Read, "accounts", 0.5)
            .with_filter("z", json!(1))
            .with_filter("a", json!(2));
        let keys: Vec<_> = c.filter.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "z"]);
    }
}
