//! Generation of *Twins* scenarios for testing Byzantine behaviour in BFT consensus
//! implementations, following the [Twins paper](https://arxiv.org/abs/2004.10617).
//!
//! The main concepts are:
//! * A *twin* is a pair of network participants sharing one replica identity but holding
//!   independent network identities. Both run an unmodified, honest state machine, yet
//!   because their memory is isolated and they receive different messages they exhibit
//!   Byzantine behaviour such as equivocation and amnesia, without any changes to
//!   protocol code.
//! * In each round (view) the participants are divided into disjoint partitions; a test
//!   network only delivers messages between participants of the same partition in that
//!   round. This is how the scenarios exercise partial synchrony and sub-quorum sizes.
//! * Each round designates a leader. When a twinned replica leads, both of its
//!   participants lead, which yields conflicting proposals.
//! * The [`Generator`] enumerates the full cross product of (partitioning × leader) over
//!   all rounds, lazily, so a harness can replay every combination — or a seeded shuffle
//!   of it — deterministically on any host.
//!
//! The crate is pure compute: no I/O, no global state, no concurrency. A generator is
//! single-threaded; run independent generators for parallel exploration.

mod config;
mod generator;
mod node;
mod partition;
mod scenario;

pub use config::Config;
pub use generator::Generator;
pub use node::{NetworkId, NodeId, NodeSet, ReplicaId};
pub use scenario::{PartitionScenario, Scenario, ViewSpec};
