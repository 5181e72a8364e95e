//! Identities of the network participants.

use std::{collections::BTreeSet, fmt};

/// Identifier of a logical replica, `1..=replicas`. A twinned replica is represented by
/// two participants carrying the same `ReplicaId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplicaId(pub u32);

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport-level identity, unique across all participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkId(pub u32);

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A network participant: the replica it acts as, plus its own transport identity.
///
/// Ordered by `(replica, network)`, which coincides with roster allocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    /// Replica identity, shared with the twin if there is one.
    pub replica: ReplicaId,
    /// Transport identity, never shared.
    pub network: NetworkId,
}

impl NodeId {
    /// Whether the two ids belong to the same logical replica without being the same
    /// participant.
    pub fn is_twin_of(&self, other: &NodeId) -> bool {
        self.replica == other.replica && self.network != other.network
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.replica, self.network)
    }
}

/// A group of participants that can talk to each other within one round.
///
/// Iteration order is `(replica, network)` ascending, so rendering and comparisons are
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeSet(BTreeSet<NodeId>);

impl NodeSet {
    /// New empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant. Returns whether it was newly inserted.
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.0.insert(id)
    }

    /// Whether the participant is a member of this group.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.0.contains(id)
    }

    /// Number of participants in the group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the group is empty. Empty groups stand for unused partition slots.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over members in `(replica, network)` order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a NodeId;
    type IntoIter = std::collections::btree_set::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for NodeSet {
    type Item = NodeId;
    type IntoIter = std::collections::btree_set::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "}}")
    }
}
