//! The scenario generator: builds the flat (leader, partitioning) table and walks its
//! `rounds`-fold Cartesian product.

use std::sync::Arc;

use anyhow::Context as _;
use rand::{rngs::StdRng, seq::SliceRandom as _, Rng as _, SeedableRng as _};

use crate::{
    config::Config,
    node::{NetworkId, NodeId, ReplicaId},
    partition,
    scenario::{Scenario, ViewSpec},
};

/// Exhaustive, reproducible enumerator of twins scenarios.
///
/// All derived tables are built once by [`Generator::new`] and never change afterwards;
/// iteration only advances the per-round odometer. Two generators built from the same
/// [`Config`] emit identical scenario sequences, and identical shuffled sequences for
/// the same [`Generator::shuffle`] seed.
///
/// The generator is single-threaded and non-reentrant. There is no cancellation: callers
/// simply stop iterating. Independent generators can run in parallel without
/// coordination.
#[derive(Debug)]
pub struct Generator {
    /// Global roster: twinned participants first, then the rest.
    nodes: Arc<Vec<NodeId>>,
    replicas: usize,
    num_twins: usize,
    rounds: usize,
    /// Flat cross of every partition scenario with every possible leader.
    view_specs: Vec<ViewSpec>,
    /// Odometer over `view_specs`, one digit per round.
    indices: Vec<usize>,
    /// Additive per-round offsets, populated by [`Generator::shuffle`].
    offsets: Vec<usize>,
    exhausted: bool,
}

impl Generator {
    /// Builds a generator: assigns replica and network identities, enumerates all
    /// partition scenarios, and crosses them with every possible leader.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.verify().context("invalid generator config")?;

        // Assign identities. A twinned replica takes two consecutive network ids, every
        // other replica takes one. Network ids are handed out in strictly increasing
        // order.
        let mut twins = Vec::with_capacity(2 * config.num_twins);
        let mut plain = Vec::with_capacity(config.replicas - config.num_twins);
        let mut network = 1;
        for replica in 1..=config.replicas as u32 {
            let replica = ReplicaId(replica);
            if twins.len() < 2 * config.num_twins {
                twins.push(NodeId {
                    replica,
                    network: NetworkId(network),
                });
                network += 1;
                twins.push(NodeId {
                    replica,
                    network: NetworkId(network),
                });
            } else {
                plain.push(NodeId {
                    replica,
                    network: NetworkId(network),
                });
            }
            network += 1;
        }
        let mut nodes = twins.clone();
        nodes.extend_from_slice(&plain);

        let partition_scenarios = partition::scenarios(&twins, &plain, config.max_partitions, 1);
        let num_partitionings = partition_scenarios.len();

        // Cross every partition scenario with every choice of leader; the leader varies
        // fastest.
        let mut view_specs = Vec::with_capacity(num_partitionings * config.replicas);
        for partitions in partition_scenarios {
            let partitions = Arc::new(partitions);
            for replica in 1..=config.replicas as u32 {
                view_specs.push(ViewSpec {
                    leader: ReplicaId(replica),
                    partitions: partitions.clone(),
                });
            }
        }

        tracing::debug!(
            "built scenario tables: {num_partitionings} partitionings, {} view specs",
            view_specs.len()
        );

        Ok(Self {
            nodes: Arc::new(nodes),
            replicas: config.replicas,
            num_twins: config.num_twins,
            rounds: config.rounds,
            view_specs,
            indices: vec![0; config.rounds],
            offsets: vec![0; config.rounds],
            // A scenario without rounds is nothing to emit.
            exhausted: config.rounds == 0,
        })
    }

    /// The global participant roster shared by every emitted scenario: twinned
    /// participants first in allocation order, then the non-twinned ones.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of logical replicas.
    pub fn num_replicas(&self) -> usize {
        self.replicas
    }

    /// Number of twinned replicas.
    pub fn num_twins(&self) -> usize {
        self.num_twins
    }

    /// Number of network participants, replicas and twins together.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct (leader, partitioning) view specs each round draws from.
    pub fn view_spec_count(&self) -> usize {
        self.view_specs.len()
    }

    /// Total number of scenarios this generator emits over its lifetime, or `None` if
    /// the count overflows `u128`.
    pub fn scenario_count(&self) -> Option<u128> {
        if self.rounds == 0 {
            return Some(0);
        }
        let rounds = u32::try_from(self.rounds).ok()?;
        (self.view_specs.len() as u128).checked_pow(rounds)
    }

    /// Applies a deterministic permutation to the view-spec table and draws a random
    /// additive offset for every round.
    ///
    /// The permutation is a Fisher–Yates shuffle ([`SliceRandom::shuffle`]) driven by
    /// [`StdRng`] seeded from `seed`, so two generators shuffled with the same seed emit
    /// the same sequence. `StdRng` is only guaranteed stable for the `rand` version this
    /// crate pins; pin the dependency (or share scenarios, not seeds) when reproducing
    /// cases across builds.
    ///
    /// Call before the first [`Generator::next_scenario`]; shuffling mid-iteration
    /// rearranges the part of the product that has not been emitted yet.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.view_specs.shuffle(&mut rng);
        for offset in &mut self.offsets {
            *offset = rng.gen_range(0..self.view_specs.len());
        }
        tracing::trace!("shuffled view specs with seed {seed}");
    }

    /// Produces the next scenario, or `None` once the whole cross product has been
    /// emitted.
    ///
    /// Successive calls walk the `rounds`-fold Cartesian product of the view-spec table
    /// with an odometer: one digit per round, incremented from the last round backwards.
    /// When the carry spills past the first round the generator latches exhausted; the
    /// scenario computed on that call is still returned, so exactly
    /// `view_spec_count() ^ rounds` scenarios come out in total.
    pub fn next_scenario(&mut self) -> Option<Scenario> {
        if self.exhausted {
            return None;
        }

        let n = self.view_specs.len();
        let views = self
            .indices
            .iter()
            .zip(&self.offsets)
            .map(|(&index, &offset)| {
                // Both terms are below `n`, so a single wrap-around is enough.
                let mut index = index + offset;
                if index >= n {
                    index -= n;
                }
                self.view_specs[index].clone()
            })
            .collect();

        for i in (0..self.rounds).rev() {
            self.indices[i] += 1;
            if self.indices[i] < n {
                break;
            }
            self.indices[i] = 0;
            if i == 0 {
                self.exhausted = true;
            }
        }

        Some(Scenario {
            nodes: self.nodes.clone(),
            views,
        })
    }
}

impl Iterator for Generator {
    type Item = Scenario;

    fn next(&mut self) -> Option<Scenario> {
        self.next_scenario()
    }
}
