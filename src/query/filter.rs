//! Filter parsing: flat query-string keys into typed per-field conditions.

use std::collections::HashMap;

/// Article fields that can be filtered and sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    Title,
    Theme,
    Description,
    ViewsCount,
    LastChangedAt,
}

impl QueryField {
    pub const ALL: [QueryField; 5] = [
        QueryField::Title,
        QueryField::Theme,
        QueryField::Description,
        QueryField::ViewsCount,
        QueryField::LastChangedAt,
    ];

    /// Wire name, as used in query strings and stored documents.
    pub fn name(self) -> &'static str {
        match self {
            QueryField::Title => "title",
            QueryField::Theme => "theme",
            QueryField::Description => "description",
            QueryField::ViewsCount => "viewsCount",
            QueryField::LastChangedAt => "lastChangedAt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for QueryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Bracket-suffixed comparison operators, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub const ALL: [Comparison; 4] = [
        Comparison::Gt,
        Comparison::Gte,
        Comparison::Lt,
        Comparison::Lte,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Comparison::Gt => "gt",
            Comparison::Gte => "gte",
            Comparison::Lt => "lt",
            Comparison::Lte => "lte",
        }
    }

    pub fn sql_operator(self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

/// A single predicate on a field. Values stay raw strings; the storage layer
/// decides how to interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals(String),
    Compare(Comparison, String),
}

impl Condition {
    pub fn value(&self) -> &str {
        match self {
            Condition::Equals(v) | Condition::Compare(_, v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(QueryField, Condition)>,
}

impl Filter {
    /// Build a filter from raw query parameters.
    ///
    /// `field=value` yields an exact match; `field[op]=value` yields a
    /// comparison. At most one condition is kept per field: later operators
    /// (in `gt, gte, lt, lte` order) overwrite earlier ones and any exact
    /// match. Empty values are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut filter = Filter::default();

        for field in QueryField::ALL {
            if let Some(value) = non_empty(params, field.name()) {
                filter.set(field, Condition::Equals(value.to_string()));
            }
            for op in Comparison::ALL {
                let key = format!("{}[{}]", field.name(), op.key());
                if let Some(value) = non_empty(params, &key) {
                    filter.set(field, Condition::Compare(op, value.to_string()));
                }
            }
        }

        filter
    }

    /// Replace whatever condition `field` had.
    pub fn set(&mut self, field: QueryField, condition: Condition) {
        match self.conditions.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = condition,
            None => self.conditions.push((field, condition)),
        }
    }

    pub fn with(mut self, field: QueryField, condition: Condition) -> Self {
        self.set(field, condition);
        self
    }

    pub fn get(&self, field: QueryField) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, c)| c)
    }

    pub fn conditions(&self) -> &[(QueryField, Condition)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_exact_match() {
        let filter = Filter::from_params(&params(&[("theme", "art")]));
        assert_eq!(
            filter.get(QueryField::Theme),
            Some(&Condition::Equals("art".to_string()))
        );
        assert_eq!(filter.conditions().len(), 1);
    }

    #[test]
    fn test_comparison_operators() {
        let filter = Filter::from_params(&params(&[
            ("viewsCount[gte]", "100"),
            ("lastChangedAt[lt]", "2024-01-01"),
        ]));
        assert_eq!(
            filter.get(QueryField::ViewsCount),
            Some(&Condition::Compare(Comparison::Gte, "100".to_string()))
        );
        assert_eq!(
            filter.get(QueryField::LastChangedAt),
            Some(&Condition::Compare(Comparison::Lt, "2024-01-01".to_string()))
        );
    }

    #[test]
    fn test_operator_overwrites_exact_match() {
        let filter = Filter::from_params(&params(&[
            ("viewsCount", "5"),
            ("viewsCount[gt]", "10"),
        ]));
        assert_eq!(
            filter.get(QueryField::ViewsCount),
            Some(&Condition::Compare(Comparison::Gt, "10".to_string()))
        );
    }

    #[test]
    fn test_last_operator_in_fixed_order_wins() {
        let filter = Filter::from_params(&params(&[
            ("viewsCount[lte]", "50"),
            ("viewsCount[gt]", "10"),
            ("viewsCount[gte]", "20"),
        ]));
        assert_eq!(
            filter.get(QueryField::ViewsCount),
            Some(&Condition::Compare(Comparison::Lte, "50".to_string()))
        );
    }

    #[test]
    fn test_unknown_and_empty_keys_are_ignored() {
        let filter = Filter::from_params(&params(&[
            ("author", "someone"),
            ("title", ""),
            ("page", "2"),
            ("viewsCount[ne]", "3"),
        ]));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_values_are_not_coerced() {
        let filter = Filter::from_params(&params(&[("viewsCount", "not-a-number")]));
        assert_eq!(
            filter.get(QueryField::ViewsCount).map(Condition::value),
            Some("not-a-number")
        );
    }

    #[test]
    fn test_field_names() {
        assert_eq!(QueryField::from_name("viewsCount"), Some(QueryField::ViewsCount));
        assert_eq!(QueryField::from_name("views_count"), None);
        assert_eq!(QueryField::LastChangedAt.to_string(), "lastChangedAt");
    }
}
