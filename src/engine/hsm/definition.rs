// State tree definition

use super::path::StatePath;
use super::resolve::resolve_target;
use super::runtime::RuntimeState;
use super::HsmError;
use std::collections::BTreeMap;

/// Kind of a state node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Regular state, atomic or compound depending on its children
    #[default]
    State,
    /// Pseudo-state standing for the last active child of its parent
    History,
}

/// A node of the state tree.
///
/// Leaf nodes have no children and no `initial`. Transition targets in
/// `on` use `.child` for descendants of this node, `sibling.child` for
/// paths relative to this node's parent (falling back to the root) and
/// `#a.b` for absolute paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateNode {
    pub id: String,

    pub initial: Option<String>,

    /// Name of the entry action, resolved against the machine's action table
    pub entry: Option<String>,

    /// Children keyed by id
    pub states: BTreeMap<String, StateNode>,

    /// Event name -> transition target
    pub on: BTreeMap<String, String>,

    pub kind: NodeKind,
}

impl StateNode {
    /// Create a leaf state
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Create a history pseudo-state
    pub fn history(id: &str) -> Self {
        Self {
            kind: NodeKind::History,
            ..Self::new(id)
        }
    }

    /// Set the initial child
    pub fn initial(mut self, id: &str) -> Self {
        self.initial = Some(id.to_string());
        self
    }

    /// Set the entry action name
    pub fn entry(mut self, action: &str) -> Self {
        self.entry = Some(action.to_string());
        self
    }

    /// Add an event handler
    pub fn on(mut self, event: &str, target: &str) -> Self {
        self.on.insert(event.to_string(), target.to_string());
        self
    }

    /// Add a child state
    pub fn child(mut self, node: StateNode) -> Self {
        self.states.insert(node.id.clone(), node);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.states.is_empty()
    }

    pub fn is_history(&self) -> bool {
        self.kind == NodeKind::History
    }

    /// Get a direct child by id
    pub fn get_child(&self, id: &str) -> Option<&StateNode> {
        self.states.get(id)
    }

    /// Transition target declared for `event` on this node
    pub fn handler(&self, event: &str) -> Option<&str> {
        self.on.get(event).map(String::as_str)
    }
}

/// A complete, named state tree
#[derive(Debug, Clone, PartialEq)]
pub struct MachineDefinition {
    pub id: String,
    pub root: StateNode,
}

impl MachineDefinition {
    /// Create a definition; the root node takes the machine id
    pub fn new(id: &str, mut root: StateNode) -> Self {
        root.id = id.to_string();
        Self {
            id: id.to_string(),
            root,
        }
    }

    /// Look up a node by path
    pub fn node(&self, path: &StatePath) -> Option<&StateNode> {
        path.segments()
            .iter()
            .try_fold(&self.root, |node, id| node.get_child(id))
    }

    /// Fully qualified name of a path, for diagnostics
    pub fn qualified(&self, path: &StatePath) -> String {
        if path.is_root() {
            self.id.clone()
        } else {
            format!("{}.{}", self.id, path)
        }
    }

    /// All nodes in depth-first pre-order, paired with their paths
    pub fn walk(&self) -> Vec<(StatePath, &StateNode)> {
        let mut nodes = Vec::new();
        let mut stack = vec![(StatePath::root(), &self.root)];
        while let Some((path, node)) = stack.pop() {
            for (id, child) in node.states.iter().rev() {
                stack.push((path.child(id), child));
            }
            nodes.push((path, node));
        }
        nodes
    }

    /// Check the tree is consistent and every transition target resolves
    /// to a leaf.
    ///
    /// Composite states without `initial` are accepted as long as nothing
    /// can stop on them: no transition targets them directly, no `initial`
    /// names them and no history pseudo-state can restore them.
    pub fn validate(&self) -> Result<(), HsmError> {
        if self.root.is_leaf() || self.root.initial.is_none() {
            return Err(HsmError::MissingInitial {
                state: self.id.clone(),
            });
        }
        self.validate_node(&StatePath::root(), &self.root)?;

        let fresh = RuntimeState::default();
        for (path, node) in self.walk() {
            for (event, target) in &node.on {
                resolve_target(self, &path, target, &fresh).map_err(|source| {
                    HsmError::InvalidTransition {
                        state: self.qualified(&path),
                        event: event.clone(),
                        source: Box::new(source),
                    }
                })?;
            }
        }
        Ok(())
    }

    fn validate_node(&self, path: &StatePath, node: &StateNode) -> Result<(), HsmError> {
        for (id, child) in &node.states {
            if id.is_empty() || id.contains('.') || id.starts_with('#') {
                return Err(HsmError::InvalidStateId {
                    parent: self.qualified(path),
                    id: id.clone(),
                });
            }
            let child_path = path.child(id);
            if child.is_history() {
                let malformed = !child.is_leaf()
                    || child.initial.is_some()
                    || child.entry.is_some()
                    || !child.on.is_empty();
                if malformed {
                    return Err(HsmError::MalformedHistory {
                        state: self.qualified(&child_path),
                    });
                }
                // History falls back to the parent's initial
                if node.initial.is_none() {
                    return Err(HsmError::MissingInitial {
                        state: self.qualified(path),
                    });
                }
                // and restores any sibling, which must then descend by itself
                let stranded = node.states.iter().find(|(_, sibling)| {
                    !sibling.is_history() && !sibling.is_leaf() && sibling.initial.is_none()
                });
                if let Some((id, _)) = stranded {
                    return Err(HsmError::MissingInitial {
                        state: self.qualified(&path.child(id)),
                    });
                }
            }
            self.validate_node(&child_path, child)?;
        }

        if node.is_leaf() {
            if node.initial.is_some() {
                return Err(HsmError::LeafWithInitial {
                    state: self.qualified(path),
                });
            }
        } else if let Some(initial) = &node.initial {
            let child = node
                .get_child(initial)
                .filter(|child| !child.is_history())
                .ok_or_else(|| HsmError::InvalidInitial {
                    state: self.qualified(path),
                    initial: initial.clone(),
                })?;
            if !child.is_leaf() && child.initial.is_none() {
                return Err(HsmError::MissingInitial {
                    state: self.qualified(&path.child(initial)),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door() -> MachineDefinition {
        MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("closed")
                .child(StateNode::new("closed").on("OPEN", "open"))
                .child(StateNode::new("open").entry("creak").on("CLOSE", "closed")),
        )
    }

    #[test]
    fn test_valid_definition() {
        assert!(door().validate().is_ok());
    }

    #[test]
    fn test_node_lookup() {
        let def = door();
        assert_eq!(def.node(&StatePath::from("open")).unwrap().id, "open");
        assert!(def.node(&StatePath::from("ajar")).is_none());
        assert_eq!(def.node(&StatePath::root()).unwrap().id, "door");
    }

    #[test]
    fn test_walk_is_preorder() {
        let def = door();
        let paths: Vec<String> = def.walk().iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, vec!["", "closed", "open"]);
    }

    #[test]
    fn test_root_requires_initial() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door").child(StateNode::new("closed")),
        );
        assert!(matches!(def.validate(), Err(HsmError::MissingInitial { .. })));
    }

    #[test]
    fn test_initial_must_be_child() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("ajar")
                .child(StateNode::new("closed")),
        );
        assert!(matches!(def.validate(), Err(HsmError::InvalidInitial { .. })));
    }

    #[test]
    fn test_leaf_with_initial_rejected() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("closed")
                .child(StateNode::new("closed").initial("locked")),
        );
        assert!(matches!(def.validate(), Err(HsmError::LeafWithInitial { .. })));
    }

    #[test]
    fn test_history_needs_parent_initial() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door").initial("frame").child(
                StateNode::new("frame")
                    .child(StateNode::new("closed"))
                    .child(StateNode::history("back")),
            ),
        );
        assert!(matches!(def.validate(), Err(HsmError::MissingInitial { .. })));
    }

    #[test]
    fn test_history_cannot_be_initial() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("back")
                .child(StateNode::new("closed"))
                .child(StateNode::history("back")),
        );
        assert!(matches!(def.validate(), Err(HsmError::InvalidInitial { .. })));
    }

    #[test]
    fn test_dotted_id_rejected() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("a.b")
                .child(StateNode::new("a.b")),
        );
        assert!(matches!(def.validate(), Err(HsmError::InvalidStateId { .. })));
    }

    #[test]
    fn test_unresolved_target_rejected() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("closed")
                .child(StateNode::new("closed").on("OPEN", "ajar")),
        );
        match def.validate() {
            Err(HsmError::InvalidTransition { state, event, .. }) => {
                assert_eq!(state, "door.closed");
                assert_eq!(event, "OPEN");
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_target_into_composite_without_initial_rejected() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door")
                .initial("closed")
                .child(StateNode::new("closed").on("LOCK", "locked"))
                .child(StateNode::new("locked").child(StateNode::new("bolted"))),
        );
        assert!(matches!(
            def.validate(),
            Err(HsmError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_history_cannot_restore_composite_without_initial() {
        // `two.x` enters `two` explicitly, `a.hist` could later restore it
        let def = MachineDefinition::new(
            "m",
            StateNode::new("m")
                .initial("a")
                .child(
                    StateNode::new("a")
                        .initial("one")
                        .on("LEAVE", "b")
                        .child(StateNode::new("one").on("GO", "two.x"))
                        .child(
                            StateNode::new("two")
                                .child(StateNode::new("x"))
                                .child(StateNode::new("y")),
                        )
                        .child(StateNode::history("hist")),
                )
                .child(StateNode::new("b").on("BACK", "a.hist")),
        );
        match def.validate() {
            Err(HsmError::MissingInitial { state }) => assert_eq!(state, "m.a.two"),
            other => panic!("Expected MissingInitial, got {:?}", other),
        }
    }

    #[test]
    fn test_history_siblings_with_initial_accepted() {
        let def = MachineDefinition::new(
            "m",
            StateNode::new("m")
                .initial("a")
                .child(
                    StateNode::new("a")
                        .initial("one")
                        .on("LEAVE", "b")
                        .child(StateNode::new("one").on("GO", "two.y"))
                        .child(
                            StateNode::new("two")
                                .initial("x")
                                .child(StateNode::new("x"))
                                .child(StateNode::new("y")),
                        )
                        .child(StateNode::history("hist")),
                )
                .child(StateNode::new("b").on("BACK", "a.hist")),
        );
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_initial_chain_must_reach_leaf() {
        let def = MachineDefinition::new(
            "door",
            StateNode::new("door").initial("frame").child(
                StateNode::new("frame").child(StateNode::new("closed")),
            ),
        );
        assert!(matches!(def.validate(), Err(HsmError::MissingInitial { .. })));
    }
}
