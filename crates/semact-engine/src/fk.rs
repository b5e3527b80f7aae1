//! Foreign-key inference — naming heuristics as a swappable strategy.
//!
//! Nothing in a dataset declares relations. The default strategy guesses
//! from names alone: a field ending in "id" can reference another
//! collection, and a name that mentions the source collection (or a
//! common relational word) is a stronger guess than a bare id field.
//! Declared-schema or learned matchers can replace it without touching
//! the proposer.

/// Scores how plausibly `field` (in the collection being acted on)
/// references records of `source` (the collection a matched value lives
/// in). Zero means "not a foreign key at all"; higher is more plausible.
pub trait ForeignKeyMatcher: Send + Sync {
    fn confidence(&self, field: &str, source: &str) -> f32;
}

/// Field names containing one of these read as references to a person or
/// owner entity even when they don't mention the collection by name.
const RELATION_WORDS: [&str; 4] = ["holder", "owner", "user", "person"];

/// Name-based heuristic matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFkMatcher;

impl ForeignKeyMatcher for HeuristicFkMatcher {
    fn confidence(&self, field: &str, source: &str) -> f32 {
        let field = field.to_lowercase();
        if !field.ends_with("id") {
            return 0.0;
        }
        let source = source.to_lowercase();
        let singular = singularize(&source);
        if field.contains(source.as_str()) || field.contains(singular.as_str()) {
            return 1.0;
        }
        if RELATION_WORDS.iter().any(|word| field.contains(word)) {
            return 0.75;
        }
        // A bare id-suffixed field could still be the link.
        0.25
    }
}

/// Naive English singular: strip one trailing 's'.
pub fn singularize(name: &str) -> String {
    name.strip_suffix('s').unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_id_fields_score_zero() {
        let m = HeuristicFkMatcher;
        assert_eq!(m.confidence("bank", "holders"), 0.0);
        assert_eq!(m.confidence("name", "holders"), 0.0);
    }

    #[test]
    fn source_named_fields_score_highest() {
        let m = HeuristicFkMatcher;
        let named = m.confidence("holders_id", "holders");
        let singular = m.confidence("holder_id", "holders");
        let relational = m.confidence("owner_id", "accounts");
        let bare = m.confidence("id", "holders");

        assert_eq!(named, 1.0);
        assert_eq!(singular, 1.0);
        assert!(relational > bare);
        assert!(bare > 0.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let m = HeuristicFkMatcher;
        assert_eq!(m.confidence("HoldersId", "Holders"), 1.0);
    }

    #[test]
    fn singularize_strips_one_s() {
        assert_eq!(singularize("holders"), "holder");
        assert_eq!(singularize("goals"), "goal");
        assert_eq!(singularize("cashFlow"), "cashFlow");
    }
}
