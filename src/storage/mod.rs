mod sqlite_store;

pub use sqlite_store::ArticleStore;

use serde::Serialize;

/// One row of the views-by-theme report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeViews {
    pub theme: String,
    pub views: i64,
}

/// One row of the most-liked report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedArticle {
    pub title: String,
    pub comments_count: i64,
    pub rating: f64,
}
