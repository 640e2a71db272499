//! Read-only catalog of lesson topics.
//!
//! The built-in data set is compiled into the binary from `data/topics.json`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Question, Topic, TopicError, TopicId};

const BUILTIN_TOPICS: &str = include_str!("../data/topics.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("duplicate topic id: {0}")]
    DuplicateTopic(TopicId),

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("malformed topic data: {0}")]
    Parse(#[from] serde_json::Error),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct TopicRecord {
    id: TopicId,
    title: String,
    lesson: String,
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    prompt: String,
    options: Vec<String>,
    answer: usize,
}

impl TopicRecord {
    fn validate(self) -> Result<Topic, TopicError> {
        let id = self.id;
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Question::new(record.prompt, record.options, record.answer).map_err(|source| {
                    TopicError::InvalidQuestion {
                        topic: id.clone(),
                        number: index + 1,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Topic::new(id, self.title, self.lesson, questions)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<Arc<Topic>>,
    by_id: HashMap<TopicId, usize>,
}

impl TopicCatalog {
    /// The compiled-in data set.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded data is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_TOPICS)
    }

    /// Parse a catalog from a JSON array of topic records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, the model error for
    /// invalid records and `CatalogError::DuplicateTopic` for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<TopicRecord> = serde_json::from_str(json)?;
        let topics = records
            .into_iter()
            .map(TopicRecord::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_topics(topics)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateTopic` if two topics share an id.
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(topics.len());
        for (index, topic) in topics.iter().enumerate() {
            if by_id.insert(topic.id().clone(), index).is_some() {
                return Err(CatalogError::DuplicateTopic(topic.id().clone()));
            }
        }

        Ok(Self {
            topics: topics.into_iter().map(Arc::new).collect(),
            by_id,
        })
    }

    /// # Errors
    ///
    /// Returns `CatalogError::TopicNotFound` for an unknown id.
    pub fn get(&self, id: &TopicId) -> Result<Arc<Topic>, CatalogError> {
        self.by_id
            .get(id)
            .map(|&index| Arc::clone(&self.topics[index]))
            .ok_or_else(|| CatalogError::TopicNotFound(id.to_string()))
    }

    /// Lookup by raw key, as received from a presentation layer.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TopicNotFound` for an unknown or blank id.
    pub fn get_str(&self, id: &str) -> Result<Arc<Topic>, CatalogError> {
        let parsed = TopicId::new(id).map_err(|_| CatalogError::TopicNotFound(id.to_string()))?;
        self.get(&parsed)
    }

    /// Topics in authored order.
    pub fn topics(&self) -> impl Iterator<Item = &Arc<Topic>> {
        self.topics.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_authored_topics() {
        let catalog = TopicCatalog::builtin().unwrap();
        let ids: Vec<_> = catalog.topics().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, ["photosynthesis", "electricity", "titration"]);

        let counts: Vec<_> = catalog.topics().map(|t| t.question_count()).collect();
        assert_eq!(counts, [8, 6, 3]);
    }

    #[test]
    fn builtin_catalog_preserves_question_order() {
        let catalog = TopicCatalog::builtin().unwrap();
        let topic = catalog.get_str("electricity").unwrap();
        assert_eq!(topic.title(), "Electricity Basics");
        assert_eq!(topic.questions()[0].prompt(), "Unit of current?");
        assert_eq!(topic.questions()[0].correct_option_text(), "Amps");
        assert_eq!(topic.questions()[5].prompt(), "Parallel circuit has:");
    }

    #[test]
    fn unknown_topic_is_not_found() {
        let catalog = TopicCatalog::builtin().unwrap();
        let err = catalog.get_str("nonexistent").unwrap_err();
        assert!(matches!(err, CatalogError::TopicNotFound(ref id) if id == "nonexistent"));
        assert!(matches!(
            catalog.get_str("   ").unwrap_err(),
            CatalogError::TopicNotFound(_)
        ));
    }

    #[test]
    fn get_hands_out_shared_topic() {
        let catalog = TopicCatalog::builtin().unwrap();
        let a = catalog.get_str("titration").unwrap();
        let b = catalog.get_str("titration").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "a", "title": "A", "lesson": "", "questions": [{"prompt": "q", "options": ["x", "y"], "answer": 0}]},
            {"id": "a", "title": "A again", "lesson": "", "questions": [{"prompt": "q", "options": ["x", "y"], "answer": 1}]}
        ]"#;
        let err = TopicCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTopic(id) if id.as_str() == "a"));
    }

    #[test]
    fn invalid_question_names_its_position() {
        let json = r#"[
            {"id": "a", "title": "A", "lesson": "", "questions": [
                {"prompt": "ok", "options": ["x", "y"], "answer": 0},
                {"prompt": "bad", "options": ["x", "y"], "answer": 5}
            ]}
        ]"#;
        let err = TopicCatalog::from_json(json).unwrap_err();
        match err {
            CatalogError::Topic(TopicError::InvalidQuestion { number, .. }) => {
                assert_eq!(number, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = TopicCatalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
