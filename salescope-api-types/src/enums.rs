use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for ordered queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter operations accepted on the wire.
///
/// Unknown operation names fail deserialization, so every value of this enum
/// has a translation in the predicate builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperationKind {
    Equals,
    NotEquals,
    GreaterThan,
    LesserThan,
    GreaterThanOrEquals,
    LesserThanOrEquals,
    IsNull,
    IsNotNull,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    ArrayHasSome,
}

impl FilterOperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperationKind::Equals => "EQUALS",
            FilterOperationKind::NotEquals => "NOT_EQUALS",
            FilterOperationKind::GreaterThan => "GREATER_THAN",
            FilterOperationKind::LesserThan => "LESSER_THAN",
            FilterOperationKind::GreaterThanOrEquals => "GREATER_THAN_OR_EQUALS",
            FilterOperationKind::LesserThanOrEquals => "LESSER_THAN_OR_EQUALS",
            FilterOperationKind::IsNull => "IS_NULL",
            FilterOperationKind::IsNotNull => "IS_NOT_NULL",
            FilterOperationKind::Like => "LIKE",
            FilterOperationKind::NotLike => "NOT_LIKE",
            FilterOperationKind::In => "IN",
            FilterOperationKind::NotIn => "NOT_IN",
            FilterOperationKind::Between => "BETWEEN",
            FilterOperationKind::ArrayHasSome => "ARRAY_HAS_SOME",
        }
    }

    /// Operations that compare the field against an ordered scalar
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            FilterOperationKind::GreaterThan
                | FilterOperationKind::LesserThan
                | FilterOperationKind::GreaterThanOrEquals
                | FilterOperationKind::LesserThanOrEquals
                | FilterOperationKind::Between
        )
    }
}

impl fmt::Display for FilterOperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_wire_names() {
        let op: FilterOperationKind = serde_json::from_str("\"ARRAY_HAS_SOME\"").unwrap();
        assert_eq!(op, FilterOperationKind::ArrayHasSome);
        assert_eq!(
            serde_json::to_string(&FilterOperationKind::GreaterThanOrEquals).unwrap(),
            "\"GREATER_THAN_OR_EQUALS\""
        );
        assert_eq!(FilterOperationKind::NotLike.to_string(), "NOT_LIKE");
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let result = serde_json::from_str::<FilterOperationKind>("\"CONTAINS_ALL\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_direction_serde() {
        let dir: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(dir, SortDirection::Desc);
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"asc\"");
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }
}
