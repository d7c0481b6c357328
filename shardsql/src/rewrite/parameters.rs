//! Parameter list construction and per-target distribution.
//!
//! A [`ParameterBuilder`] is created once per logical statement from its
//! original parameter list, populated with insert row units and
//! pagination replacements, then frozen into a [`ParameterPlan`]. The
//! frozen plan is an `Arc`-backed snapshot, safe to read from one task
//! per routing unit; registration after the first read is
//! unrepresentable because freezing consumes the builder.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::RowDistribution;
use crate::error::Error;
use crate::route::{DataNode, RouteResult, RoutingUnit};
use crate::statement::OptimizedStatement;
use crate::value::ParameterValue;

/// One logical insert row's bound values and its physical target(s).
#[derive(Debug, Clone, PartialEq)]
pub struct InsertParameterUnit {
    parameters: Vec<ParameterValue>,
    data_nodes: Vec<DataNode>,
}

impl InsertParameterUnit {
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

    fn matches(&self, routing_unit: &RoutingUnit, policy: RowDistribution) -> bool {
        match policy {
            RowDistribution::Replicate => {
                self.data_nodes.iter().any(|node| routing_unit.targets(node))
            }
            RowDistribution::FirstNode => self
                .data_nodes
                .first()
                .map(|node| routing_unit.targets(node))
                .unwrap_or(false),
        }
    }
}

/// Builds the final parameter list for a routed statement.
///
/// Additions use original (pre-insertion) indexes, replacements use
/// post-insertion indexes; additions are applied first. Register
/// additions before replacements.
#[derive(Debug, Clone, Default)]
pub struct ParameterBuilder {
    original: Vec<ParameterValue>,
    added: BTreeMap<usize, ParameterValue>,
    replaced: BTreeMap<usize, ParameterValue>,
    units: Vec<InsertParameterUnit>,
    row_distribution: RowDistribution,
}

impl ParameterBuilder {
    pub fn new(parameters: Vec<ParameterValue>) -> Self {
        Self {
            original: parameters,
            ..Default::default()
        }
    }

    pub fn with_row_distribution(mut self, policy: RowDistribution) -> Self {
        self.row_distribution = policy;
        self
    }

    pub fn original(&self) -> &[ParameterValue] {
        &self.original
    }

    pub fn units(&self) -> &[InsertParameterUnit] {
        &self.units
    }

    /// Derive one parameter unit per insert row. Idempotent; a statement
    /// that isn't an insert is a no-op.
    pub fn set_insert_units(&mut self, statement: &OptimizedStatement) {
        if !self.units.is_empty() {
            return;
        }

        let insert = match statement.insert() {
            Some(insert) => insert,
            None => return,
        };

        for row in insert.rows() {
            self.units.push(InsertParameterUnit::new(
                row.parameters().to_vec(),
                row.data_nodes().to_vec(),
            ));
        }

        debug!("derived {} insert parameter units", self.units.len());
    }

    /// Register revised offset/row-count replacements for a paginated
    /// SELECT routed to more than one target. Anything else is a no-op:
    /// a single shard holds all matching rows and needs no over-fetch,
    /// and literal pagination is rewritten at the text layer.
    pub fn set_pagination_rewrite(&mut self, route: &RouteResult) -> Result<(), Error> {
        if route.is_single_routing() {
            return Ok(());
        }

        let pagination = match route.statement().select().and_then(|select| select.pagination()) {
            Some(pagination) => pagination,
            None => return Ok(()),
        };

        if let Some(index) = pagination.offset().and_then(|offset| offset.parameter_index()) {
            let revised = pagination.revised_offset();
            debug!("pagination offset at index {} revised to {}", index, revised);
            self.replace_parameter(index, ParameterValue::Bigint(revised as i64))?;
        }

        if let Some(index) = pagination
            .row_count()
            .and_then(|row_count| row_count.parameter_index())
        {
            let revised = pagination.revised_row_count();
            debug!(
                "pagination row count at index {} revised to {}",
                index, revised
            );
            self.replace_parameter(index, ParameterValue::Bigint(revised as i64))?;
        }

        Ok(())
    }

    /// Splice a parameter in at `index` (original index space), shifting
    /// later parameters right.
    pub fn add_parameter(&mut self, index: usize, value: ParameterValue) -> Result<(), Error> {
        if index > self.original.len() {
            return Err(Error::ParameterIndex(index));
        }
        self.added.insert(index, value);
        Ok(())
    }

    /// Replace the parameter at `index` (post-insertion index space).
    pub fn replace_parameter(&mut self, index: usize, value: ParameterValue) -> Result<(), Error> {
        if index >= self.original.len() + self.added.len() {
            return Err(Error::ParameterIndex(index));
        }
        self.replaced.insert(index, value);
        Ok(())
    }

    /// Freeze the builder. No more registrations; the returned plan is
    /// cheap to clone and safe to read concurrently.
    pub fn freeze(self) -> ParameterPlan {
        ParameterPlan {
            plan: Arc::new(self),
        }
    }

    fn revised(&self) -> Vec<ParameterValue> {
        let mut result = self.original.clone();

        // Ascending order; earlier insertions shift the original indexes
        // of later ones.
        for (applied, (&index, value)) in self.added.iter().enumerate() {
            result.insert((index + applied).min(result.len()), value.clone());
        }

        for (&index, value) in &self.replaced {
            if let Some(slot) = result.get_mut(index) {
                *slot = value.clone();
            }
        }

        trace!("revised parameters: {:?}", result);
        result
    }
}

/// Frozen parameter plan. Dereferences to the builder's read accessors.
#[derive(Debug, Clone, Default)]
pub struct ParameterPlan {
    plan: Arc<ParameterBuilder>,
}

impl Deref for ParameterPlan {
    type Target = ParameterBuilder;

    fn deref(&self) -> &Self::Target {
        &self.plan
    }
}

impl ParameterPlan {
    /// The global final parameter list: insert unit values in row order
    /// when units are registered (the add/replace maps don't apply to
    /// insert row values), the revised original list otherwise.
    pub fn parameters(&self) -> Vec<ParameterValue> {
        if self.plan.units.is_empty() {
            return self.plan.revised();
        }

        let mut result = vec![];
        for unit in &self.plan.units {
            result.extend_from_slice(unit.parameters());
        }
        result
    }

    /// The parameter list scoped to one physical target. Insert rows are
    /// filtered by data node intersection with the routing unit, each
    /// matching row included exactly once, in row order. Non-insert
    /// statements bind the same parameters on every target.
    pub fn parameters_for(&self, routing_unit: &RoutingUnit) -> Vec<ParameterValue> {
        if self.plan.units.is_empty() {
            return self.plan.revised();
        }

        let mut result = vec![];
        for unit in &self.plan.units {
            if unit.matches(routing_unit, self.plan.row_distribution) {
                result.extend_from_slice(unit.parameters());
            }
        }

        if result.is_empty() {
            debug!(
                "no insert rows matched routing unit \"{}\"",
                routing_unit.data_source()
            );
        }

        result
    }
}
