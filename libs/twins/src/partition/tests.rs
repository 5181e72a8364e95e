use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{is_feasible, placement_tuples, scenarios, sizes, twin_placements, TwinPlacement};
use crate::node::{NetworkId, NodeId, NodeSet, ReplicaId};

fn node(replica: u32, network: u32) -> NodeId {
    NodeId {
        replica: ReplicaId(replica),
        network: NetworkId(network),
    }
}

fn placement(first: usize, second: usize) -> TwinPlacement {
    TwinPlacement { first, second }
}

fn node_set(ids: &[NodeId]) -> NodeSet {
    ids.iter().copied().collect()
}

#[test]
fn test_sizes() {
    assert_eq!(sizes(3, 2, 1), vec![vec![3, 0], vec![2, 1]]);
    assert_eq!(sizes(4, 2, 1), vec![vec![4, 0], vec![3, 1], vec![2, 2]]);
    assert_eq!(sizes(5, 2, 1), vec![vec![5, 0], vec![4, 1], vec![3, 2]]);
    assert_eq!(
        sizes(3, 3, 1),
        vec![vec![3, 0, 0], vec![2, 1, 0], vec![1, 1, 1]]
    );
    // A single slot takes everything.
    assert_eq!(sizes(4, 1, 1), vec![vec![4]]);
    // The minimum size bounds the first part from below.
    assert_eq!(sizes(4, 2, 3), vec![vec![4, 0], vec![3, 1]]);
    // Degenerate dimensions produce nothing.
    assert_eq!(sizes(0, 2, 1), Vec::<Vec<usize>>::new());
    assert_eq!(sizes(4, 0, 1), Vec::<Vec<usize>>::new());
}

#[test]
fn prop_sizes() {
    let rng = &mut StdRng::seed_from_u64(98123);
    for _ in 0..100 {
        let n = rng.gen_range(0..=8);
        let k = rng.gen_range(0..=4);
        let min_size = rng.gen_range(1..=3);

        let got = sizes(n, k, min_size);
        let got_len = got.len();
        let got = BTreeSet::from_iter(got);
        assert_eq!(
            got.len(),
            got_len,
            "duplicates n={n} k={k} min_size={min_size}"
        );

        let want = sizes_naive(n, k, min_size);
        assert_eq!(got, want, "values n={n} k={k} min_size={min_size}");
    }
}

/// Naive implementation of the size enumeration to test against: generate every vector
/// of `k` entries in `0..=n` and keep the valid ones.
fn sizes_naive(n: usize, k: usize, min_size: usize) -> BTreeSet<Vec<usize>> {
    let mut acc = BTreeSet::new();
    acc.insert(Vec::new());
    for _ in 0..k {
        acc = acc
            .into_iter()
            .flat_map(|s| {
                (0..=n).map(move |size| {
                    let mut s = s.clone();
                    s.push(size);
                    s
                })
            })
            .collect();
    }
    acc.into_iter()
        .filter(|s| s.iter().sum::<usize>() == n)
        .filter(|s| s.windows(2).all(|w| w[0] >= w[1]))
        .filter(|s| s.first().is_some_and(|first| *first >= min_size))
        .collect()
}

#[test]
fn test_twin_placements() {
    assert_eq!(twin_placements(1), vec![placement(0, 0)]);
    assert_eq!(
        twin_placements(2),
        vec![placement(0, 0), placement(0, 1), placement(1, 1)]
    );
    let got = twin_placements(4);
    assert_eq!(got.len(), 4 * 5 / 2);
    // Lexicographic on (first, second), with first <= second.
    for pair in got.windows(2) {
        assert!((pair[0].first, pair[0].second) < (pair[1].first, pair[1].second));
    }
    for p in got {
        assert!(p.first <= p.second);
    }
}

#[test]
fn test_placement_tuples() {
    let placements = twin_placements(2);

    // No twins: a single empty tuple keeps the downstream product alive.
    assert_eq!(placement_tuples(&placements, 0), vec![Vec::new()]);

    let tuples = placement_tuples(&placements, 2);
    assert_eq!(tuples.len(), 9);
    // The last position varies fastest.
    assert_eq!(tuples[0], vec![placement(0, 0), placement(0, 0)]);
    assert_eq!(tuples[1], vec![placement(0, 0), placement(0, 1)]);
    assert_eq!(tuples[2], vec![placement(0, 0), placement(1, 1)]);
    assert_eq!(tuples[3], vec![placement(0, 1), placement(0, 0)]);
    assert_eq!(tuples[8], vec![placement(1, 1), placement(1, 1)]);
}

#[test]
fn test_feasibility() {
    // Two twins fit into a partition of two.
    assert!(is_feasible(&[placement(0, 0)], &[2, 0]));
    // But not into a partition of one, even if there is room elsewhere.
    assert!(!is_feasible(&[placement(0, 0)], &[1, 1]));
    // Split placement needs capacity on both sides.
    assert!(is_feasible(&[placement(0, 1)], &[1, 1]));
    assert!(!is_feasible(&[placement(0, 1)], &[1, 0]));
    // Out-of-range partitions are rejected, not a panic.
    assert!(!is_feasible(&[placement(2, 2)], &[1, 1]));
    // Capacity is consumed across pairs.
    assert!(is_feasible(&[placement(0, 1), placement(1, 1)], &[1, 3]));
    assert!(!is_feasible(&[placement(0, 1), placement(1, 1)], &[1, 2]));
    // The empty tuple always fits.
    assert!(is_feasible(&[], &[0, 0]));
}

#[test]
fn test_scenarios_single_twin() {
    // 4 replicas with 1 twin split into up to 2 partitions.
    let twins = [node(1, 1), node(1, 2)];
    let plain = [node(2, 3), node(3, 4), node(4, 5)];

    let got = scenarios(&twins, &plain, 2, 1);

    // Sizes [5,0], [4,1], [3,2] admit 1, 2 and 3 placements respectively.
    let want = vec![
        // [5,0] — everyone together.
        vec![
            node_set(&[node(1, 1), node(1, 2), node(2, 3), node(3, 4), node(4, 5)]),
            node_set(&[]),
        ],
        // [4,1], twins together: plain nodes fill up in roster order.
        vec![
            node_set(&[node(1, 1), node(1, 2), node(2, 3), node(3, 4)]),
            node_set(&[node(4, 5)]),
        ],
        // [4,1], twins split.
        vec![
            node_set(&[node(1, 1), node(2, 3), node(3, 4), node(4, 5)]),
            node_set(&[node(1, 2)]),
        ],
        // [3,2], twins together.
        vec![
            node_set(&[node(1, 1), node(1, 2), node(2, 3)]),
            node_set(&[node(3, 4), node(4, 5)]),
        ],
        // [3,2], twins split.
        vec![
            node_set(&[node(1, 1), node(2, 3), node(3, 4)]),
            node_set(&[node(1, 2), node(4, 5)]),
        ],
        // [3,2], both twins in the smaller partition.
        vec![
            node_set(&[node(2, 3), node(3, 4), node(4, 5)]),
            node_set(&[node(1, 1), node(1, 2)]),
        ],
    ];
    assert_eq!(got, want);
}

#[test]
fn test_scenarios_no_twins() {
    let plain = [node(1, 1), node(2, 2), node(3, 3)];

    // One partition: a single scenario with everyone together.
    let got = scenarios(&[], &plain, 1, 1);
    assert_eq!(got, vec![vec![node_set(&plain)]]);

    // Two partitions: one scenario per size composition.
    let got = scenarios(&[], &plain, 2, 1);
    assert_eq!(
        got,
        vec![
            vec![node_set(&plain), node_set(&[])],
            vec![
                node_set(&[node(1, 1), node(2, 2)]),
                node_set(&[node(3, 3)])
            ],
        ]
    );
}

#[test]
fn prop_scenarios() {
    let rng = &mut StdRng::seed_from_u64(29483920);
    for _ in 0..50 {
        let replicas = rng.gen_range(1..=5);
        let num_twins = rng.gen_range(0..=replicas);
        let k = rng.gen_range(1..=3);

        // Roster in the same shape the generator allocates: twins first.
        let mut twins = Vec::new();
        let mut plain = Vec::new();
        let mut network = 1;
        for replica in 1..=replicas as u32 {
            if twins.len() < 2 * num_twins {
                twins.push(node(replica, network));
                twins.push(node(replica, network + 1));
                network += 1;
            } else {
                plain.push(node(replica, network));
            }
            network += 1;
        }

        let all: BTreeSet<_> = twins.iter().chain(&plain).copied().collect();
        for partitioning in scenarios(&twins, &plain, k, 1) {
            assert_eq!(partitioning.len(), k, "one slot per allowed partition");
            let total: usize = partitioning.iter().map(|p| p.len()).sum();
            assert_eq!(total, all.len(), "nothing dropped or duplicated");
            let union: BTreeSet<_> = partitioning.iter().flatten().copied().collect();
            assert_eq!(union, all, "partitions cover the roster");
        }
    }
}
