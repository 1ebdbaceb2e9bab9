// Pure transition resolution
//
// Maps (definition, runtime state, event) to the handling node and the
// target leaf path without touching the context or running actions.

use super::definition::MachineDefinition;
use super::path::StatePath;
use super::runtime::RuntimeState;
use super::HsmError;

/// Outcome of resolving an event against the active configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Innermost active node declaring a handler for the event
    pub handler: StatePath,
    /// Leaf the machine ends up in
    pub target: StatePath,
}

/// Find the innermost node on `active` (leaf first, root last) that
/// handles `event`, returning its path and the declared target.
pub fn find_handler<'a>(
    definition: &'a MachineDefinition,
    active: &StatePath,
    event: &str,
) -> Option<(StatePath, &'a str)> {
    (0..=active.len()).rev().find_map(|depth| {
        let path = active.truncated(depth);
        definition
            .node(&path)
            .and_then(|node| node.handler(event))
            .map(|target| (path, target))
    })
}

/// Resolve a target string declared on `handler` to a leaf path.
///
/// - `.a.b` walks down from the handler itself
/// - `#a.b` walks down from the root
/// - `a.b` walks down from the handler's parent when it has a child `a`,
///   otherwise from the root
pub fn resolve_target(
    definition: &MachineDefinition,
    handler: &StatePath,
    target: &str,
    runtime: &RuntimeState,
) -> Result<StatePath, HsmError> {
    let unresolved = || HsmError::UnresolvedTarget {
        state: definition.qualified(handler),
        target: target.to_string(),
    };

    let (base, relative) = if let Some(rest) = target.strip_prefix('.') {
        (handler.clone(), rest)
    } else if let Some(rest) = target.strip_prefix('#') {
        (StatePath::root(), rest)
    } else {
        let first = target.split('.').next().unwrap_or_default();
        let sibling_base = handler.parent().filter(|parent| {
            definition
                .node(parent)
                .is_some_and(|node| node.get_child(first).is_some())
        });
        (sibling_base.unwrap_or_else(StatePath::root), target)
    };

    if relative.is_empty() {
        return Err(unresolved());
    }

    let mut path = base;
    for segment in relative.split('.') {
        let has_child = definition
            .node(&path)
            .is_some_and(|node| node.get_child(segment).is_some());
        if !has_child {
            return Err(unresolved());
        }
        path = path.child(segment);
    }

    descend(definition, path, runtime)
}

/// Follow history and `initial` chains from `path` down to a leaf
pub fn descend(
    definition: &MachineDefinition,
    mut path: StatePath,
    runtime: &RuntimeState,
) -> Result<StatePath, HsmError> {
    loop {
        let node = definition
            .node(&path)
            .ok_or_else(|| HsmError::UnknownState {
                state: definition.qualified(&path),
            })?;

        if node.is_history() {
            let parent = path.parent().ok_or_else(|| HsmError::MalformedHistory {
                state: definition.qualified(&path),
            })?;
            let fallback = definition
                .node(&parent)
                .and_then(|parent_node| parent_node.initial.as_deref());
            let restored = runtime
                .last_child(&parent)
                .or(fallback)
                .ok_or_else(|| HsmError::MissingInitial {
                    state: definition.qualified(&parent),
                })?;
            path = parent.child(restored);
            continue;
        }

        if node.is_leaf() {
            return Ok(path);
        }

        let initial = node
            .initial
            .as_deref()
            .ok_or_else(|| HsmError::MissingInitial {
                state: definition.qualified(&path),
            })?;
        path = path.child(initial);
    }
}

/// Resolve `event` against the active configuration.
///
/// Returns `Ok(None)` when no active node handles the event.
pub fn resolve_transition(
    definition: &MachineDefinition,
    runtime: &RuntimeState,
    event: &str,
) -> Result<Option<Resolution>, HsmError> {
    let Some((handler, target)) = find_handler(definition, runtime.active(), event) else {
        return Ok(None);
    };
    let target = resolve_target(definition, &handler, target, runtime)?;
    Ok(Some(Resolution { handler, target }))
}
