//! Query shapes

use super::expr::{Column, Expr};
use crate::emitter::{is_plain_identifier, EmitError};

/// The one relation a query reads from
///
/// Only plain identifiers are accepted so the name can be written into SQL
/// without quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    table: String,
}

impl Source {
    pub fn table(name: impl Into<String>) -> Result<Self, EmitError> {
        let name = name.into();
        if !is_plain_identifier(&name) {
            return Err(EmitError::InvalidIdentifier(name));
        }
        Ok(Self { table: name })
    }

    pub fn name(&self) -> &str {
        &self.table
    }
}

/// One item in the SELECT list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectItem {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort key: an output column name and direction
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

/// A single SELECT statement over one source
///
/// `predicates` are AND-combined; an empty projection selects `*`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub projection: Vec<SelectItem>,
    pub source: Source,
    pub predicates: Vec<Expr>,
    pub group_by: Vec<Column>,
    pub order_by: Vec<SortKey>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn new(source: Source) -> Self {
        Self {
            projection: Vec::new(),
            source,
            predicates: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn select(mut self, item: SelectItem) -> Self {
        self.projection.push(item);
        self
    }

    pub fn filter(mut self, predicate: Expr) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn group_by(mut self, column: Column) -> Self {
        self.group_by.push(column);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(SortKey {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Output name of each projected item, if it has one
    pub fn output_names(&self) -> Vec<Option<&str>> {
        self.projection
            .iter()
            .map(|item| match (&item.alias, &item.expr) {
                (Some(alias), _) => Some(alias.as_str()),
                (None, Expr::Column(col)) => Some(col.name.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rejects_non_identifiers() {
        assert!(Source::table("population").is_ok());
        assert!(Source::table("pums_2023").is_ok());
        assert!(Source::table("population; DROP TABLE x").is_err());
        assert!(Source::table("").is_err());
        assert!(Source::table("9lives").is_err());
    }

    #[test]
    fn test_output_names() {
        let query = SelectQuery::new(Source::table("t").unwrap())
            .select(SelectItem::new(Expr::col("cbsa_id")))
            .select(SelectItem::aliased(Expr::count_all(), "count"))
            .select(SelectItem::new(Expr::count_all()));
        assert_eq!(query.output_names(), vec![Some("cbsa_id"), Some("count"), None]);
    }
}
