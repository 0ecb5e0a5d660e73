// src/entity/comment.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

pub const VALID_EVALUATIONS: &[&str] = &["like", "dislike"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    Like,
    Dislike,
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluation::Like => write!(f, "like"),
            Evaluation::Dislike => write!(f, "dislike"),
        }
    }
}

impl std::str::FromStr for Evaluation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Evaluation::Like),
            "dislike" => Ok(Evaluation::Dislike),
            _ => Err(format!("Invalid evaluation: {}", s)),
        }
    }
}

/// A comment embedded in its parent article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(with = "timestamp")]
    pub last_changed_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(evaluation: Option<Evaluation>, content: Option<String>) -> Self {
        Self {
            evaluation,
            content,
            last_changed_at: timestamp::now(),
        }
    }

    pub fn like() -> Self {
        Self::new(Some(Evaluation::Like), None)
    }

    pub fn dislike() -> Self {
        Self::new(Some(Evaluation::Dislike), None)
    }
}
