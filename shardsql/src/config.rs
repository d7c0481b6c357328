//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controls where a multi-row insert's parameters go when a row is bound
/// to more than one data node.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RowDistribution {
    /// The row is included in every routing unit targeting one of its
    /// data nodes. Broadcast and duplicated writes get the row's
    /// parameters on every target (default).
    #[default]
    Replicate,
    /// Only the row's first data node decides placement. Extra nodes on
    /// a strictly-sharded table are ignored.
    FirstNode,
}

impl fmt::Display for RowDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RowDistribution::Replicate => "replicate",
            RowDistribution::FirstNode => "first_node",
        };
        f.write_str(value)
    }
}

impl FromStr for RowDistribution {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replicate" => Ok(RowDistribution::Replicate),
            "first_node" => Ok(RowDistribution::FirstNode),
            _ => Err(()),
        }
    }
}

/// Rewrite engine settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RewriteConfig {
    /// Insert row to routing unit matching policy.
    #[serde(default)]
    pub row_distribution: RowDistribution,
}
