// src/entity/article.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::{Comment, Evaluation};
use super::timestamp;

pub const MIN_TITLE_LENGTH: usize = 10;

pub const VALID_THEMES: &[&str] = &["trips", "shopping", "beauty", "art", "food"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Trips,
    Shopping,
    Beauty,
    Art,
    Food,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Trips => write!(f, "trips"),
            Theme::Shopping => write!(f, "shopping"),
            Theme::Beauty => write!(f, "beauty"),
            Theme::Art => write!(f, "art"),
            Theme::Food => write!(f, "food"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trips" => Ok(Theme::Trips),
            "shopping" => Ok(Theme::Shopping),
            "beauty" => Ok(Theme::Beauty),
            "art" => Ok(Theme::Art),
            "food" => Ok(Theme::Food),
            _ => Err(format!(
                "`{}` is not a valid theme. Valid themes: {}",
                s,
                VALID_THEMES.join(", ")
            )),
        }
    }
}

/// A persisted article. Derived attributes are not stored; see [`ArticleView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub views_count: i64,
    #[serde(with = "timestamp")]
    pub last_changed_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Article {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            theme,
            description: None,
            views_count: 0,
            last_changed_at: timestamp::now(),
            comments: Vec::new(),
        }
    }

    pub fn likes_quantity(&self) -> usize {
        likes_quantity(&self.comments)
    }

    pub fn dislikes_quantity(&self) -> usize {
        dislikes_quantity(&self.comments)
    }

    pub fn rating(&self) -> f64 {
        rating(&self.comments)
    }

    /// The read-side shape of this article, derived attributes included.
    pub fn view(&self) -> ArticleView<'_> {
        ArticleView {
            article: self,
            likes_quantity: self.likes_quantity(),
            dislikes_quantity: self.dislikes_quantity(),
            rating: self.rating(),
        }
    }
}

/// An article as returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView<'a> {
    #[serde(flatten)]
    pub article: &'a Article,
    pub likes_quantity: usize,
    pub dislikes_quantity: usize,
    pub rating: f64,
}

fn count_evaluations(comments: &[Comment], evaluation: Evaluation) -> usize {
    comments
        .iter()
        .filter(|c| c.evaluation == Some(evaluation))
        .count()
}

pub fn likes_quantity(comments: &[Comment]) -> usize {
    count_evaluations(comments, Evaluation::Like)
}

pub fn dislikes_quantity(comments: &[Comment]) -> usize {
    count_evaluations(comments, Evaluation::Dislike)
}

/// `(likes - dislikes) / total + 1`, or 0 for an article without comments.
pub fn rating(comments: &[Comment]) -> f64 {
    if comments.is_empty() {
        return 0.0;
    }
    let likes = likes_quantity(comments) as f64;
    let dislikes = dislikes_quantity(comments) as f64;
    (likes - dislikes) / comments.len() as f64 + 1.0
}
