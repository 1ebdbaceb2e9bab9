// Runtime state of a running machine

use super::path::StatePath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Active configuration plus history memory.
///
/// `history` maps a composite state's path to the id of the child that
/// was active when that child was last exited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuntimeState {
    active: StatePath,
    #[serde(default)]
    history: BTreeMap<String, String>,
}

impl RuntimeState {
    pub fn new(active: StatePath) -> Self {
        Self {
            active,
            history: BTreeMap::new(),
        }
    }

    /// Path from the root to the active leaf
    pub fn active(&self) -> &StatePath {
        &self.active
    }

    /// Child of `parent` recorded at its most recent exit
    pub fn last_child(&self, parent: &StatePath) -> Option<&str> {
        self.history.get(&parent.to_string()).map(String::as_str)
    }

    pub(crate) fn record_exit(&mut self, parent: &StatePath, child: &str) {
        self.history.insert(parent.to_string(), child.to_string());
    }

    pub(crate) fn set_active(&mut self, active: StatePath) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_memory() {
        let mut state = RuntimeState::new(StatePath::from("jumping"));
        assert_eq!(state.last_child(&StatePath::from("grounded")), None);

        state.record_exit(&StatePath::from("grounded"), "walking");
        state.record_exit(&StatePath::from("grounded"), "hiding");
        assert_eq!(state.last_child(&StatePath::from("grounded")), Some("hiding"));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = RuntimeState::new(StatePath::from("stepping.up"));
        state.record_exit(&StatePath::from("grounded"), "idle");

        let json = serde_json::to_string(&state).unwrap();
        let restored: RuntimeState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
