// src/entity/input.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::article::{Article, Theme, MIN_TITLE_LENGTH};
use super::comment::{Comment, Evaluation, VALID_EVALUATIONS};
use super::timestamp;
use crate::error::{GazetteError, Result};

/// Write payload for create and partial update.
///
/// Every field is optional so that the same payload serves both operations;
/// unknown fields (including `id`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub views_count: Option<i64>,
    #[serde(default, with = "timestamp::option")]
    pub last_changed_at: Option<DateTime<Utc>>,
    pub comments: Option<Vec<CommentInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub evaluation: Option<String>,
    pub content: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub last_changed_at: Option<DateTime<Utc>>,
}

impl From<Comment> for CommentInput {
    fn from(comment: Comment) -> Self {
        Self {
            evaluation: comment.evaluation.map(|e| e.to_string()),
            content: comment.content,
            last_changed_at: Some(comment.last_changed_at),
        }
    }
}

impl ArticleInput {
    /// Validate the payload as a brand new article.
    pub fn into_article(self) -> Result<Article> {
        validate(Uuid::new_v4(), self)
    }

    /// Merge the payload over `existing` and validate the result with the
    /// same rules as a create. `lastChangedAt` only changes when supplied.
    pub fn apply_to(self, existing: Article) -> Result<Article> {
        let merged = ArticleInput {
            title: self.title.or(Some(existing.title)),
            theme: self.theme.or(Some(existing.theme.to_string())),
            description: self.description.or(existing.description),
            views_count: self.views_count.or(Some(existing.views_count)),
            last_changed_at: self.last_changed_at.or(Some(existing.last_changed_at)),
            comments: self.comments.or_else(|| {
                Some(existing.comments.into_iter().map(CommentInput::from).collect())
            }),
        };
        validate(existing.id, merged)
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn validate(id: Uuid, input: ArticleInput) -> Result<Article> {
    let mut errors = Vec::new();
    let now = timestamp::now();

    let title = match input.title.filter(|t| !t.is_empty()) {
        None => {
            errors.push("Title is required".to_string());
            None
        }
        Some(t) if t.chars().count() < MIN_TITLE_LENGTH => {
            errors.push(format!(
                "Title must be at least {} characters long (got {})",
                MIN_TITLE_LENGTH,
                t.chars().count()
            ));
            None
        }
        Some(t) => Some(t),
    };

    let theme = match input.theme.filter(|t| !t.is_empty()) {
        None => {
            errors.push("Theme is required".to_string());
            None
        }
        Some(raw) => match raw.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(msg) => {
                errors.push(msg);
                None
            }
        },
    };

    let comments: Vec<Comment> = input
        .comments
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(idx, c)| {
            let evaluation = c.evaluation.and_then(|raw| match raw.parse::<Evaluation>() {
                Ok(e) => Some(e),
                Err(_) => {
                    errors.push(format!(
                        "`{}` is not a valid evaluation for comment {}. Valid evaluations: {}",
                        raw,
                        idx + 1,
                        VALID_EVALUATIONS.join(", ")
                    ));
                    None
                }
            });
            Comment {
                evaluation,
                content: trimmed(c.content),
                last_changed_at: c.last_changed_at.unwrap_or(now),
            }
        })
        .collect();

    match (title, theme) {
        (Some(title), Some(theme)) if errors.is_empty() => Ok(Article {
            id,
            title,
            theme,
            description: trimmed(input.description),
            views_count: input.views_count.unwrap_or(0),
            last_changed_at: input.last_changed_at.unwrap_or(now),
            comments,
        }),
        _ => Err(GazetteError::Validation(errors)),
    }
}
