use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-contributor counters for one run. Only ever incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub num_prs_created: u32,
    pub num_prs_reviewed: u32,
    pub num_prs_approved: u32,
    pub num_comments: u32,
}

impl UserStats {
    pub fn is_inactive(&self) -> bool {
        self.num_prs_created + self.num_prs_reviewed + self.num_prs_approved + self.num_comments
            == 0
    }
}

/// Identity-deduplicated contributors, keyed by case-sensitive name.
/// Scoped to a single run: initialized empty, discarded with the run.
/// Name ordering keeps snapshot output stable across reruns.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: BTreeMap<String, UserStats>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per distinct name; creates the entry on first reference.
    pub fn get_or_create(&mut self, name: &str) -> &mut UserStats {
        self.users.entry(name.to_string()).or_default()
    }

    pub fn get(&self, name: &str) -> Option<&UserStats> {
        self.users.get(name)
    }

    /// Contributors with at least one nonzero counter, in name order.
    pub fn active_members(&self) -> impl Iterator<Item = (&str, &UserStats)> {
        self.users
            .iter()
            .filter(|(_, stats)| !stats.is_inactive())
            .map(|(name, stats)| (name.as_str(), stats))
    }
}
