//! Optimizer output consumed by the rewrite engine.
//!
//! These are interface types: the upstream statement optimizer computes
//! per-row insert values, their target data nodes and the pagination
//! descriptor; the rewrite engine only reads them.

use crate::pagination::Pagination;
use crate::route::DataNode;
use crate::value::ParameterValue;

/// An already-parsed, already-optimized statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OptimizedStatement {
    Select(SelectStatement),
    Insert(InsertStatement),
    #[default]
    Other,
}

impl OptimizedStatement {
    pub fn select(&self) -> Option<&SelectStatement> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn insert(&self) -> Option<&InsertStatement> {
        match self {
            Self::Insert(insert) => Some(insert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    pagination: Option<Pagination>,
}

impl SelectStatement {
    pub fn new(pagination: Option<Pagination>) -> Self {
        Self { pagination }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }
}

/// A multi-row INSERT with per-row placement already computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStatement {
    rows: Vec<InsertRow>,
}

impl InsertStatement {
    pub fn new(rows: Vec<InsertRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[InsertRow] {
        &self.rows
    }
}

/// One logical VALUES row and the data node(s) it is written to.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRow {
    parameters: Vec<ParameterValue>,
    data_nodes: Vec<DataNode>,
}

impl InsertRow {
    pub fn new(parameters: Vec<ParameterValue>, data_nodes: Vec<DataNode>) -> Self {
        Self {
            parameters,
            data_nodes,
        }
    }

    pub fn parameters(&self) -> &[ParameterValue] {
        &self.parameters
    }

    pub fn data_nodes(&self) -> &[DataNode] {
        &self.data_nodes
    }
}
