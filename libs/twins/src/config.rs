//! Generator configuration.

/// Configuration of a scenario [`Generator`](crate::Generator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of logical replicas in the cluster.
    pub replicas: usize,
    /// Number of replicas that get a twin. Each twin adds one extra network participant
    /// to the roster.
    pub num_twins: usize,
    /// Maximum number of partitions the roster may be split into in any round.
    pub max_partitions: usize,
    /// Number of rounds in every generated scenario.
    pub rounds: usize,
}

impl Config {
    /// Number of network participants: every replica, plus one extra node per twin.
    pub fn num_nodes(&self) -> usize {
        self.replicas + self.num_twins
    }

    /// Checks that the configuration describes a cluster that can be partitioned.
    pub(crate) fn verify(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.replicas > 0,
            "cluster must contain at least one replica"
        );
        anyhow::ensure!(
            self.num_twins <= self.replicas,
            "at most one twin per replica: num_twins ({}) > replicas ({})",
            self.num_twins,
            self.replicas,
        );
        anyhow::ensure!(
            self.max_partitions > 0,
            "nodes need at least one partition to be placed into"
        );
        Ok(())
    }
}
