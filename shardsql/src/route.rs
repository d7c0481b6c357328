//! Physical placement and routing targets.
//!
//! The routing engine decides where a statement executes; these types
//! carry that decision into the rewrite engine.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;
use crate::statement::OptimizedStatement;

/// A (data-source, table) pair, the atomic unit of physical placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataNode {
    data_source: String,
    table: String,
}

impl DataNode {
    pub fn new(data_source: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table: table.into(),
        }
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Display for DataNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.data_source, self.table)
    }
}

impl FromStr for DataNode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((data_source, table)) if !data_source.is_empty() && !table.is_empty() => {
                Ok(Self::new(data_source, table))
            }
            _ => Err(Error::DataNode(s.to_owned())),
        }
    }
}

/// One actual table targeted inside a routing unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TableUnit {
    data_source: String,
    table: String,
}

impl TableUnit {
    pub fn new(data_source: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table: table.into(),
        }
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

/// One physical execution target for a routed statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutingUnit {
    data_source: String,
    table_units: Vec<TableUnit>,
}

impl RoutingUnit {
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table_units: vec![],
        }
    }

    /// Add a table on this unit's own data source.
    pub fn with_table(mut self, table: &str) -> Self {
        let data_source = self.data_source.clone();
        self.table_units.push(TableUnit::new(data_source, table));
        self
    }

    pub fn push(&mut self, table_unit: TableUnit) {
        self.table_units.push(table_unit);
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn table_units(&self) -> &[TableUnit] {
        &self.table_units
    }

    /// Find the table unit matching a (data-source, table) pair, if any.
    pub fn table_unit(&self, data_source: &str, table: &str) -> Option<&TableUnit> {
        self.table_units
            .iter()
            .find(|unit| unit.data_source() == data_source && unit.table() == table)
    }

    /// Returns true if this unit targets the given data node.
    pub fn targets(&self, node: &DataNode) -> bool {
        self.table_unit(node.data_source(), node.table()).is_some()
    }
}

impl Display for RoutingUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.data_source)
    }
}

/// Routing engine output: the routed statement and its execution targets.
#[derive(Debug, Clone, Default, PartialEq, derive_builder::Builder)]
#[builder(default)]
pub struct RouteResult {
    statement: OptimizedStatement,
    routing_units: Vec<RoutingUnit>,
}

impl RouteResult {
    pub fn new(statement: OptimizedStatement, routing_units: Vec<RoutingUnit>) -> Self {
        Self {
            statement,
            routing_units,
        }
    }

    pub fn statement(&self) -> &OptimizedStatement {
        &self.statement
    }

    pub fn routing_units(&self) -> &[RoutingUnit] {
        &self.routing_units
    }

    /// Returns true if the statement executes on exactly one target.
    pub fn is_single_routing(&self) -> bool {
        self.routing_units.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_node_parse() {
        let node: DataNode = "ds_0.t_order_1".parse().unwrap();
        assert_eq!(node.data_source(), "ds_0");
        assert_eq!(node.table(), "t_order_1");
        assert_eq!(node.to_string(), "ds_0.t_order_1");
    }

    #[test]
    fn test_data_node_parse_invalid() {
        assert!("no_dot".parse::<DataNode>().is_err());
        assert!(".table".parse::<DataNode>().is_err());
        assert!("ds.".parse::<DataNode>().is_err());
    }

    #[test]
    fn test_routing_unit_lookup() {
        let unit = RoutingUnit::new("ds_0").with_table("t_order_0").with_table("t_order_1");
        assert!(unit.table_unit("ds_0", "t_order_0").is_some());
        assert!(unit.table_unit("ds_0", "t_order_2").is_none());
        assert!(unit.table_unit("ds_1", "t_order_0").is_none());
        assert!(unit.targets(&DataNode::new("ds_0", "t_order_1")));
    }

    #[test]
    fn test_single_routing() {
        let single = RouteResult::new(
            OptimizedStatement::Other,
            vec![RoutingUnit::new("ds_0")],
        );
        assert!(single.is_single_routing());

        let multi = RouteResultBuilder::default()
            .routing_units(vec![RoutingUnit::new("ds_0"), RoutingUnit::new("ds_1")])
            .build()
            .unwrap();
        assert!(!multi.is_single_routing());
    }
}
