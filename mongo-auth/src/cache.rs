use std::{collections::HashSet, sync::Arc};

use arc_swap::ArcSwap;

/// Databases authenticated on one connection.
///
/// Reads are lock-free snapshots and inserts swap in a new set, so no operation
/// blocks, and a database seen as authenticated by any thread stays so.
#[derive(Debug, Default)]
pub struct AuthenticatedDatabases(ArcSwap<HashSet<String>>);

impl AuthenticatedDatabases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_authenticated(&self, database: &str) {
        if self.is_authenticated(database) {
            return;
        }
        self.0.rcu(|databases| {
            let mut databases = HashSet::clone(databases);
            databases.insert(database.into());
            databases
        });
    }

    pub fn is_authenticated(&self, database: &str) -> bool {
        self.0.load().contains(database)
    }

    pub fn all_authenticated(&self) -> Arc<HashSet<String>> {
        self.0.load_full()
    }

    /// Databases of `required` not authenticated yet.
    pub fn missing(&self, required: impl IntoIterator<Item = String>) -> Vec<String> {
        let authenticated = self.0.load();
        required
            .into_iter()
            .filter(|database| !authenticated.contains(database))
            .collect()
    }
}
