use serde_json::Value;

use crate::error::{GazetteError, Result};

/// Fields a client may name in `fields=`.
pub const PROJECTABLE_FIELDS: &[&str] = &[
    "id",
    "title",
    "theme",
    "description",
    "viewsCount",
    "lastChangedAt",
    "comments",
    "likesQuantity",
    "dislikesQuantity",
    "rating",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    Include(Vec<&'static str>),
    Exclude(Vec<&'static str>),
}

impl Projection {
    /// Parse `title,theme` (inclusion) or `-comments,-description`
    /// (exclusion). The two forms cannot be mixed.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Projection::All);
        };

        let mut include = Vec::new();
        let mut exclude = Vec::new();

        for part in raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (excluded, name) = match part.strip_prefix('-') {
                Some(name) => (true, name),
                None => (false, part),
            };
            let field = PROJECTABLE_FIELDS
                .iter()
                .copied()
                .find(|f| *f == name)
                .ok_or_else(|| {
                    GazetteError::InvalidQuery(format!("Cannot select unknown field '{}'", name))
                })?;
            if excluded {
                exclude.push(field);
            } else {
                include.push(field);
            }
        }

        match (include.is_empty(), exclude.is_empty()) {
            (true, true) => Ok(Projection::All),
            (false, true) => Ok(Projection::Include(include)),
            (true, false) => Ok(Projection::Exclude(exclude)),
            (false, false) => Err(GazetteError::InvalidQuery(
                "Projection cannot mix included and excluded fields".to_string(),
            )),
        }
    }

    /// Apply to a serialized article. Inclusion always keeps `id`.
    pub fn apply(&self, value: Value) -> Value {
        let Value::Object(mut map) = value else {
            return value;
        };
        match self {
            Projection::All => {}
            Projection::Include(fields) => {
                map.retain(|key, _| key == "id" || fields.iter().any(|f| *f == key.as_str()));
            }
            Projection::Exclude(fields) => {
                map.retain(|key, _| !fields.iter().any(|f| *f == key.as_str()));
            }
        }
        Value::Object(map)
    }
}
