use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use uuid::Uuid;

use super::{RatedArticle, ThemeViews};
use crate::entity::{timestamp, Article};
use crate::error::{GazetteError, Result};
use crate::query::{Condition, Direction, Filter, Pagination, QueryField, SortKey};

/// JSON document store for articles.
///
/// Each article is one JSON document; filters, sorts and aggregations run
/// against the document through SQLite's JSON functions.
pub struct ArticleStore {
    conn: Connection,
}

impl ArticleStore {
    /// Open (or create) the store behind a path, `file:` URI or `:memory:`.
    pub fn open(connection_string: &str) -> Result<Self> {
        let conn = Connection::open(connection_string)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                doc TEXT NOT NULL CHECK (json_valid(doc))
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_articles_title
                ON articles (json_extract(doc, '$.title'));
            ",
        )?;
        Ok(())
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| GazetteError::from(e))
    }

    pub fn insert(&self, article: &Article) -> Result<()> {
        let doc = serde_json::to_string(article)?;
        self.conn
            .execute(
                "INSERT INTO articles (id, doc) VALUES (?1, ?2)",
                params![article.id.to_string(), doc],
            )
            .map_err(|e| map_write_error(e, &article.title))?;
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Article>> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "SELECT doc FROM articles WHERE id = ?1",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        doc.map(|d| serde_json::from_str(&d).map_err(GazetteError::from))
            .transpose()
    }

    /// Overwrite a stored article. Returns `false` when it no longer exists.
    pub fn replace(&self, article: &Article) -> Result<bool> {
        let doc = serde_json::to_string(article)?;
        let changed = self
            .conn
            .execute(
                "UPDATE articles SET doc = ?2 WHERE id = ?1",
                params![article.id.to_string(), doc],
            )
            .map_err(|e| map_write_error(e, &article.title))?;
        Ok(changed > 0)
    }

    pub fn delete(&self, id: &Uuid) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM articles WHERE id = ?1", [id.to_string()])?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Filtered, sorted, paginated listing.
    pub fn find(
        &self,
        filter: &Filter,
        sort: &[SortKey],
        pagination: Pagination,
    ) -> Result<Vec<Article>> {
        let mut sql = String::from("SELECT doc FROM articles");
        let mut values: Vec<SqlValue> = Vec::new();
        let mut clauses: Vec<String> = Vec::new();

        for (field, condition) in filter.conditions() {
            values.push(bind_value(*field, condition.value())?);
            let op = match condition {
                Condition::Equals(_) => "=",
                Condition::Compare(cmp, _) => cmp.sql_operator(),
            };
            clauses.push(format!(
                "json_extract(doc, '$.{}') {} ?{}",
                field.name(),
                op,
                values.len()
            ));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let mut order: Vec<String> = sort
            .iter()
            .map(|key| {
                let dir = match key.direction {
                    Direction::Ascending => "ASC",
                    Direction::Descending => "DESC",
                };
                format!("json_extract(doc, '$.{}') {}", key.field.name(), dir)
            })
            .collect();
        order.push("rowid ASC".to_string());
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));

        values.push(SqlValue::Integer(i64::from(pagination.limit)));
        sql.push_str(&format!(" LIMIT ?{}", values.len()));
        values.push(SqlValue::Integer(
            i64::try_from(pagination.skip()).unwrap_or(i64::MAX),
        ));
        sql.push_str(&format!(" OFFSET ?{}", values.len()));

        let mut stmt = self.conn.prepare(&sql)?;
        let docs = stmt
            .query_map(params_from_iter(values.iter()), |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        docs.iter()
            .map(|d| serde_json::from_str(d).map_err(GazetteError::from))
            .collect()
    }

    /// Sum of `viewsCount` per theme, highest first.
    pub fn views_by_theme(&self) -> Result<Vec<ThemeViews>> {
        let mut stmt = self.conn.prepare(
            "SELECT json_extract(doc, '$.theme') AS theme,
                    COALESCE(SUM(json_extract(doc, '$.viewsCount')), 0) AS views
             FROM articles
             GROUP BY theme
             ORDER BY views DESC, theme ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ThemeViews {
                    theme: row.get(0)?,
                    views: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Articles ranked by `(likes - dislikes) / comments`. Articles without
    /// comments produce no rows from `json_each` and never appear.
    pub fn most_liked(&self, limit: u32) -> Result<Vec<RatedArticle>> {
        let mut stmt = self.conn.prepare(
            "SELECT json_extract(a.doc, '$.title') AS title,
                    COUNT(*) AS comments_count,
                    CAST(SUM(CASE json_extract(c.value, '$.evaluation')
                                 WHEN 'like' THEN 1
                                 WHEN 'dislike' THEN -1
                                 ELSE 0
                             END) AS REAL) / COUNT(*) AS rating
             FROM articles AS a, json_each(a.doc, '$.comments') AS c
             GROUP BY a.id
             ORDER BY rating DESC, title ASC
             LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([i64::from(limit)], |row| {
                Ok(RatedArticle {
                    title: row.get(0)?,
                    comments_count: row.get(1)?,
                    rating: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

/// Interpret a raw filter value according to the field's stored type.
fn bind_value(field: QueryField, raw: &str) -> Result<SqlValue> {
    match field {
        QueryField::Title | QueryField::Theme | QueryField::Description => {
            Ok(SqlValue::Text(raw.to_string()))
        }
        QueryField::ViewsCount => {
            let trimmed = raw.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(SqlValue::Integer(n));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(SqlValue::Real)
                .ok_or_else(|| cast_error("Number", raw, field))
        }
        QueryField::LastChangedAt => timestamp::parse(raw)
            .map(|ts| SqlValue::Text(timestamp::format(&ts)))
            .ok_or_else(|| cast_error("Date", raw, field)),
    }
}

fn cast_error(kind: &'static str, raw: &str, field: QueryField) -> GazetteError {
    GazetteError::Cast {
        kind,
        value: raw.to_string(),
        field: field.name(),
    }
}

fn map_write_error(err: rusqlite::Error, title: &str) -> GazetteError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            GazetteError::DuplicateTitle(title.to_string())
        }
        _ => err.into(),
    }
}
