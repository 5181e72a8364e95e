//! Enumeration of partition scenarios: partition-size compositions, twin placements,
//! and the materialized node-set partitionings built from them.

use crate::{
    node::{NodeId, NodeSet},
    scenario::PartitionScenario,
};

/// Partition indices a pair of twinned participants is assigned to.
///
/// `first <= second` always holds; both may name the same partition, in which case the
/// twins sit together and behave like one well-connected replica.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TwinPlacement {
    /// Partition receiving the first twin of the pair.
    pub(crate) first: usize,
    /// Partition receiving the second twin of the pair.
    pub(crate) second: usize,
}

/// All non-increasing compositions of `n` into at most `k` parts, with the first part at
/// least `min_size`. Trailing zeros stand for empty partitions.
///
/// The idea is to fill out a table such as this (`n = 5`, `k = 2`):
/// ```text
///   P1 P2
///    5  0
///    4  1
///    3  2
/// ```
/// Requiring the sizes to be non-increasing is what keeps relabelled duplicates such as
/// `[1, 4]` out of the output.
///
/// The output order is deterministic: at every index the enumerator first tries to put
/// all remaining mass into the current part, then walks that part's size downwards and
/// recurses on the rest.
pub(crate) fn sizes(n: usize, k: usize, min_size: usize) -> Vec<Vec<usize>> {
    if n == 0 || k == 0 {
        return Vec::new();
    }
    let mut enumerator = SizeEnumerator {
        min_size,
        state: vec![0; k],
        output: Vec::new(),
    };
    enumerator.go(0, n);
    enumerator.output
}

/// Recursive composition generator.
struct SizeEnumerator {
    min_size: usize,
    // Partially complete composition currently being built.
    state: Vec<usize>,
    // All collected complete compositions.
    output: Vec<Vec<usize>>,
}

impl SizeEnumerator {
    /// Fills `state[i..]` with every admissible split of the remaining mass `rem`.
    ///
    /// Putting everything into part `i` is a complete composition whenever it doesn't
    /// break the non-increasing order. After emitting it, the part is walked downwards
    /// and the remainder recursed on: the first part stops at `min_size`, later parts
    /// stop at 1.
    fn go(&mut self, i: usize, rem: usize) {
        self.state[i] = rem;
        if i == 0 || self.state[i - 1] >= rem {
            self.output.push(self.state.clone());
        }
        if i + 1 == self.state.len() {
            return;
        }
        let mut max = rem - 1;
        if i > 0 {
            max = max.min(self.state[i - 1]);
        }
        let stop = if i == 0 { self.min_size } else { 1 };
        for m in (stop..=max).rev() {
            self.state[i] = m;
            self.go(i + 1, rem - m);
        }
    }
}

/// All useful ways to place a pair of twins into `k` partitions, in lexicographic order.
/// There are `k * (k + 1) / 2` of them.
pub(crate) fn twin_placements(k: usize) -> Vec<TwinPlacement> {
    let mut placements = Vec::with_capacity(k * (k + 1) / 2);
    for first in 0..k {
        for second in first..k {
            placements.push(TwinPlacement { first, second });
        }
    }
    placements
}

/// Cartesian product of `placements` with itself `t` times: one placement per twin pair.
///
/// The last tuple position varies fastest. For `t == 0` the product is a single empty
/// tuple, so clusters without twins still produce every size composition downstream.
pub(crate) fn placement_tuples(placements: &[TwinPlacement], t: usize) -> Vec<Vec<TwinPlacement>> {
    if t == 0 {
        return vec![Vec::new()];
    }
    let rest = placement_tuples(placements, t - 1);
    let mut output = Vec::with_capacity(placements.len() * rest.len());
    for placement in placements {
        for tail in &rest {
            let mut tuple = Vec::with_capacity(t);
            tuple.push(*placement);
            tuple.extend_from_slice(tail);
            output.push(tuple);
        }
    }
    output
}

/// Checks that the twin placements fit into partitions of the given sizes, reserving one
/// unit of capacity per placed participant.
pub(crate) fn is_feasible(tuple: &[TwinPlacement], sizes: &[usize]) -> bool {
    let mut capacity = sizes.to_vec();
    for placement in tuple {
        for p in [placement.first, placement.second] {
            if p >= capacity.len() || capacity[p] == 0 {
                return false;
            }
            capacity[p] -= 1;
        }
    }
    true
}

/// Materializes every feasible (size composition, twin placement) combination into a
/// concrete partitioning of the roster.
///
/// `twins` and `plain` are the twinned and non-twinned participants, in roster order.
/// For each combination, twins are placed first, consumed pairwise in roster order, and
/// the remaining capacity is then filled with `plain` participants in partition order.
/// Every produced partitioning has exactly `sizes[i]` members in slot `i` and covers
/// the roster.
pub(crate) fn scenarios(
    twins: &[NodeId],
    plain: &[NodeId],
    k: usize,
    min_size: usize,
) -> Vec<PartitionScenario> {
    let tuples = placement_tuples(&twin_placements(k), twins.len() / 2);
    let mut output = Vec::new();
    for sz in sizes(twins.len() + plain.len(), k, min_size) {
        for tuple in &tuples {
            if !is_feasible(tuple, &sz) {
                continue;
            }

            let mut partitions: PartitionScenario = vec![NodeSet::new(); k];

            let mut twin = 0;
            for placement in tuple {
                for p in [placement.first, placement.second] {
                    partitions[p].insert(twins[twin]);
                    twin += 1;
                }
            }

            let mut node = 0;
            for (partition, &size) in partitions.iter_mut().zip(&sz) {
                while partition.len() < size {
                    partition.insert(plain[node]);
                    node += 1;
                }
            }

            output.push(partitions);
        }
    }
    output
}

#[cfg(test)]
mod tests;
