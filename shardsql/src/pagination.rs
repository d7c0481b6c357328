//! Pagination descriptor and the cross-shard revision rule.

/// An OFFSET or LIMIT magnitude: either written into the SQL text, or
/// bound through a parameter at a known index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaginationValue {
    Literal(u64),
    Parameter { index: usize, value: u64 },
}

impl PaginationValue {
    pub fn value(&self) -> u64 {
        match self {
            Self::Literal(value) => *value,
            Self::Parameter { value, .. } => *value,
        }
    }

    pub fn parameter_index(&self) -> Option<usize> {
        match self {
            Self::Parameter { index, .. } => Some(*index),
            Self::Literal(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// The logical offset/row-count of a SELECT.
///
/// When the statement routes to more than one shard, each shard must
/// return its first `offset + row_count` rows so the merge step can
/// re-apply the logical offset and limit over the union. Skipping rows
/// locally would skip rows that belong in the merged result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pagination {
    offset: Option<PaginationValue>,
    row_count: Option<PaginationValue>,
}

impl Pagination {
    pub fn new(offset: Option<PaginationValue>, row_count: Option<PaginationValue>) -> Self {
        Self { offset, row_count }
    }

    pub fn offset(&self) -> Option<&PaginationValue> {
        self.offset.as_ref()
    }

    pub fn row_count(&self) -> Option<&PaginationValue> {
        self.row_count.as_ref()
    }

    /// Offset for sharded execution. Each shard scans from its own start.
    pub fn revised_offset(&self) -> u64 {
        0
    }

    /// Row count for sharded execution: the worst case has all
    /// `offset + row_count` logically-first rows on one shard.
    pub fn revised_row_count(&self) -> u64 {
        let offset = self.offset.map(|value| value.value()).unwrap_or(0);
        let row_count = self.row_count.map(|value| value.value()).unwrap_or(0);
        offset.saturating_add(row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision() {
        let pagination = Pagination::new(
            Some(PaginationValue::Literal(10)),
            Some(PaginationValue::Literal(5)),
        );
        assert_eq!(pagination.revised_offset(), 0);
        assert_eq!(pagination.revised_row_count(), 15);
    }

    #[test]
    fn test_revision_no_offset() {
        let pagination = Pagination::new(None, Some(PaginationValue::Literal(20)));
        assert_eq!(pagination.revised_row_count(), 20);
    }

    #[test]
    fn test_parameter_bound() {
        let offset = PaginationValue::Parameter { index: 2, value: 10 };
        assert_eq!(offset.parameter_index(), Some(2));
        assert_eq!(offset.value(), 10);
        assert!(!offset.is_literal());

        let literal = PaginationValue::Literal(5);
        assert_eq!(literal.parameter_index(), None);
        assert!(literal.is_literal());
    }
}
