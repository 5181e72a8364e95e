//! Scenario data types consumed by test harnesses.

use std::sync::Arc;

use crate::node::{NodeId, NodeSet, ReplicaId};

/// A division of the full roster into disjoint groups, with no communication between
/// different groups.
///
/// Always `max_partitions` slots long; slots the size enumeration left unused are
/// present-but-empty [`NodeSet`]s, never absent.
pub type PartitionScenario = Vec<NodeSet>;

/// One round of a scenario: the designated leader together with the partitioning in
/// effect for that round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSpec {
    /// Replica leading the round. When a twinned replica leads, both of its participants
    /// lead.
    pub leader: ReplicaId,
    /// Partitioning of the full roster. Shared between all rounds and scenarios that
    /// draw the same arrangement.
    pub partitions: Arc<PartitionScenario>,
}

/// An executable test scenario: a fixed participant roster plus a leader and a
/// partitioning for every round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Global roster, identical across all scenarios of one generator: twinned
    /// participants first in allocation order, then the rest.
    pub nodes: Arc<Vec<NodeId>>,
    /// Per-round view specs, one entry per round.
    pub views: Vec<ViewSpec>,
}
