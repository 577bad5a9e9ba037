// SPDX-License-Identifier: MPL-2.0
//! Structured statements attached to a file's MediaInfo entity.

use std::collections::HashMap;

/// Property: copyright license.
pub const PROP_COPYRIGHT_LICENSE: &str = "P275";

/// Property: creator.
pub const PROP_CREATOR: &str = "P170";

/// Qualifier: author name string.
pub const QUALIFIER_AUTHOR_NAME: &str = "P2093";

/// Statement rank, ordered from least to most authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Rank {
    Deprecated,
    #[default]
    Normal,
    Preferred,
}

/// Value carried by a snak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakValue {
    /// Reference to another entity (e.g. `Q18199165`).
    Entity(String),
    /// Plain text.
    Text(String),
    /// Any other datatype, or "some value" / "no value".
    Other,
}

/// A single statement: main value, rank and qualifiers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    pub rank: Rank,
    pub value: Option<SnakValue>,
    pub qualifiers: HashMap<String, Vec<SnakValue>>,
}

impl Statement {
    /// First non-empty text value of the given qualifier.
    #[must_use]
    pub fn qualifier_text(&self, property: &str) -> Option<&str> {
        self.qualifiers.get(property)?.iter().find_map(|v| match v {
            SnakValue::Text(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        })
    }

    /// Entity id of the main value, if it references an entity.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        match &self.value {
            Some(SnakValue::Entity(id)) => Some(id),
            _ => None,
        }
    }
}

/// Statements of one entity, grouped by property id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statements(HashMap<String, Vec<Statement>>);

impl Statements {
    #[must_use]
    pub fn new(map: HashMap<String, Vec<Statement>>) -> Self {
        Self(map)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All statements for a property, in document order.
    #[must_use]
    pub fn get(&self, property: &str) -> &[Statement] {
        self.0.get(property).map_or(&[], Vec::as_slice)
    }

    /// Picks the statement to use when a property has several.
    ///
    /// Highest rank wins; among equal ranks the first in document order.
    /// Deprecated statements are never selected.
    #[must_use]
    pub fn best(&self, property: &str) -> Option<&Statement> {
        let mut best: Option<&Statement> = None;
        for statement in self.get(property) {
            if statement.rank == Rank::Deprecated {
                continue;
            }
            if best.is_none_or(|b| statement.rank > b.rank) {
                best = Some(statement);
            }
        }
        best
    }

    pub fn insert(&mut self, property: impl Into<String>, statement: Statement) {
        self.0.entry(property.into()).or_default().push(statement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str, rank: Rank) -> Statement {
        Statement {
            rank,
            value: Some(SnakValue::Entity(id.to_string())),
            qualifiers: HashMap::new(),
        }
    }

    #[test]
    fn best_prefers_higher_rank() {
        let mut statements = Statements::default();
        statements.insert(PROP_COPYRIGHT_LICENSE, entity("Q1", Rank::Normal));
        statements.insert(PROP_COPYRIGHT_LICENSE, entity("Q2", Rank::Preferred));
        statements.insert(PROP_COPYRIGHT_LICENSE, entity("Q3", Rank::Normal));

        let best = statements.best(PROP_COPYRIGHT_LICENSE).unwrap();
        assert_eq!(best.entity_id(), Some("Q2"));
    }

    #[test]
    fn best_takes_first_among_equal_ranks() {
        let mut statements = Statements::default();
        statements.insert(PROP_COPYRIGHT_LICENSE, entity("Q1", Rank::Normal));
        statements.insert(PROP_COPYRIGHT_LICENSE, entity("Q2", Rank::Normal));

        let best = statements.best(PROP_COPYRIGHT_LICENSE).unwrap();
        assert_eq!(best.entity_id(), Some("Q1"));
    }

    #[test]
    fn best_skips_deprecated() {
        let mut statements = Statements::default();
        statements.insert(PROP_CREATOR, entity("Q9", Rank::Deprecated));
        assert!(statements.best(PROP_CREATOR).is_none());
    }

    #[test]
    fn qualifier_text_ignores_blank_and_non_text() {
        let mut statement = entity("Q1", Rank::Normal);
        statement.qualifiers.insert(
            QUALIFIER_AUTHOR_NAME.to_string(),
            vec![
                SnakValue::Other,
                SnakValue::Text("  ".to_string()),
                SnakValue::Text("Artem Svetlov".to_string()),
            ],
        );
        assert_eq!(
            statement.qualifier_text(QUALIFIER_AUTHOR_NAME),
            Some("Artem Svetlov")
        );
        assert_eq!(statement.qualifier_text("P999"), None);
    }

    #[test]
    fn missing_property_yields_empty_slice() {
        let statements = Statements::default();
        assert!(statements.get(PROP_CREATOR).is_empty());
        assert!(statements.is_empty());
    }
}
