//! Article endpoint handlers.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::envelope::{Envelope, Report};
use super::state::AppState;
use crate::entity::{Article, ArticleInput};
use crate::error::{GazetteError, Result};
use crate::query::{most_liked_limit, ListQuery, Projection};
use crate::storage::{RatedArticle, ThemeViews};

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| GazetteError::InvalidId(raw.to_string()))
}

/// An empty body is an empty payload; anything else must be a JSON object.
fn parse_input(body: &Bytes) -> Result<ArticleInput> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ArticleInput::default());
    }
    serde_json::from_slice(body).map_err(|e| GazetteError::InvalidBody(e.to_string()))
}

fn render(article: &Article, projection: &Projection) -> Result<Value> {
    Ok(projection.apply(serde_json::to_value(article.view())?))
}

fn single(article: &Article) -> Result<Json<Envelope<Value>>> {
    let rendered = render(article, &Projection::All)?;
    Ok(Json(Envelope::success(json!({ "article": rendered }))))
}

fn not_found(id: &Uuid) -> GazetteError {
    GazetteError::NotFound(id.to_string())
}

/// GET /api/v1/articles
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Envelope<Value>>> {
    let query = ListQuery::from_params(&params, &state.limits)?;

    let articles = {
        let store = state.store().await?;
        store.find(&query.filter, &query.sort, query.pagination)?
    };

    let rendered = articles
        .iter()
        .map(|a| render(a, &query.projection))
        .collect::<Result<Vec<_>>>()?;
    let count = rendered.len();

    Ok(Json(
        Envelope::success(json!({ "articles": rendered })).with_count(count),
    ))
}

/// GET /api/v1/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Value>>> {
    let id = parse_id(&id)?;
    let article = {
        let store = state.store().await?;
        store.get(&id)?
    };
    single(&article.ok_or_else(|| not_found(&id))?)
}

/// POST /api/v1/articles
pub async fn create_article(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Value>>)> {
    let article = parse_input(&body)?.into_article()?;
    {
        let store = state.store().await?;
        store.insert(&article)?;
    }

    info!(id = %article.id, title = %article.title, "Article created");
    Ok((StatusCode::CREATED, single(&article)?))
}

/// PATCH /api/v1/articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Envelope<Value>>> {
    let id = parse_id(&id)?;
    let input = parse_input(&body)?;

    let updated = {
        let store = state.store().await?;
        let existing = store.get(&id)?.ok_or_else(|| not_found(&id))?;
        let updated = input.apply_to(existing)?;
        if !store.replace(&updated)? {
            return Err(not_found(&id));
        }
        updated
    };

    info!(id = %updated.id, "Article updated");
    single(&updated)
}

/// DELETE /api/v1/articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let deleted = {
        let store = state.store().await?;
        store.delete(&id)?
    };

    if !deleted {
        return Err(not_found(&id));
    }
    info!(id = %id, "Article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/articles/views-by-theme
pub async fn views_by_theme(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Report<ThemeViews>>>> {
    let rows = {
        let store = state.store().await?;
        store.views_by_theme()?
    };
    Ok(Json(Envelope::success(Report::from(rows))))
}

/// GET /api/v1/articles/most-liked
pub async fn most_liked(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Envelope<Report<RatedArticle>>>> {
    let limit = most_liked_limit(&params);
    let rows = {
        let store = state.store().await?;
        store.most_liked(limit)?
    };
    Ok(Json(Envelope::success(Report::from(rows))))
}
