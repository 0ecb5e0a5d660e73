use super::filter::QueryField;
use crate::error::{GazetteError, Result};

pub const DEFAULT_SORT: &str = "-lastChangedAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: QueryField,
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(field: QueryField) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: QueryField) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }
}

/// Parse `title,-viewsCount` style sort strings. Blank input means the default
/// (most recently changed first).
pub fn parse_sort(raw: Option<&str>) -> Result<Vec<SortKey>> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SORT);

    let keys = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (direction, name) = match part.strip_prefix('-') {
                Some(name) => (Direction::Descending, name),
                None => (Direction::Ascending, part),
            };
            QueryField::from_name(name)
                .map(|field| SortKey { field, direction })
                .ok_or_else(|| {
                    GazetteError::InvalidQuery(format!("Cannot sort by unknown field '{}'", name))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if keys.is_empty() {
        return parse_sort(None);
    }
    Ok(keys)
}
