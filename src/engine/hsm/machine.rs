// State machine executor

use super::definition::MachineDefinition;
use super::path::StatePath;
use super::resolve::{descend, resolve_transition};
use super::runtime::RuntimeState;
use super::HsmError;
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;

/// Event passed to entry actions when the machine starts
pub const INIT_EVENT: &str = "init";

/// Side effect run when a state is entered, given the context and the
/// event that caused the transition
pub type EntryAction<C> = Box<dyn Fn(&mut C, &str)>;

/// Result of dispatching one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No active state handles the event; nothing changed
    Ignored,
    /// The machine moved (possibly back to the same leaf)
    Transitioned {
        from: StatePath,
        to: StatePath,
        /// Newly entered states, outermost first
        entered: Vec<StatePath>,
    },
}

/// Builder binding a definition to its entry actions
pub struct MachineBuilder<C> {
    definition: MachineDefinition,
    actions: HashMap<String, EntryAction<C>>,
}

impl<C> MachineBuilder<C> {
    pub fn new(definition: MachineDefinition) -> Self {
        Self {
            definition,
            actions: HashMap::new(),
        }
    }

    /// Register an entry action under the name used in the definition
    pub fn action<F>(mut self, name: &str, action: F) -> Self
    where
        F: Fn(&mut C, &str) + 'static,
    {
        self.actions.insert(name.to_string(), Box::new(action));
        self
    }

    /// Validate the definition and check every entry action is registered
    pub fn validate(&self) -> Result<(), HsmError> {
        self.definition.validate()?;
        for (path, node) in self.definition.walk() {
            if let Some(action) = &node.entry {
                if !self.actions.contains_key(action) {
                    return Err(HsmError::UnknownAction {
                        state: self.definition.qualified(&path),
                        action: action.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate, then enter the initial configuration, running entry
    /// actions from the root down with [`INIT_EVENT`].
    pub fn start(self, context: &mut C) -> Result<StateMachine<C>, HsmError> {
        self.validate()?;

        let leaf = descend(&self.definition, StatePath::root(), &RuntimeState::default())?;
        let machine = StateMachine {
            definition: self.definition,
            actions: self.actions,
            runtime: RuntimeState::new(leaf.clone()),
        };
        machine.enter(context, 0, &leaf, INIT_EVENT);

        debug!("{}: started in {}", machine.definition.id, leaf);
        Ok(machine)
    }
}

/// A running hierarchical state machine.
///
/// Entry actions only ever see the context `C`, never the machine, so a
/// dispatch cannot be started from inside another one.
pub struct StateMachine<C> {
    definition: MachineDefinition,
    actions: HashMap<String, EntryAction<C>>,
    runtime: RuntimeState,
}

impl<C> StateMachine<C> {
    pub fn builder(definition: MachineDefinition) -> MachineBuilder<C> {
        MachineBuilder::new(definition)
    }

    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    /// Active leaf path
    pub fn state(&self) -> &StatePath {
        self.runtime.active()
    }

    /// Send an event to the machine.
    ///
    /// The innermost active state declaring the event handles it. Exited
    /// states are recorded as their parent's history, then newly entered
    /// states run their entry actions outermost first. Unhandled events
    /// are ignored.
    pub fn dispatch(&mut self, context: &mut C, event: &str) -> Result<Dispatch, HsmError> {
        let Some(resolution) = resolve_transition(&self.definition, &self.runtime, event)? else {
            trace!(
                "{}: {} ignored in {}",
                self.definition.id,
                event,
                self.runtime.active()
            );
            return Ok(Dispatch::Ignored);
        };

        let from = self.runtime.active().clone();
        let to = resolution.target;
        let shared = from.common_prefix_len(&to);

        for depth in (shared..from.len()).rev() {
            self.runtime
                .record_exit(&from.truncated(depth), &from.segments()[depth]);
        }
        self.runtime.set_active(to.clone());

        let entered = self.enter(context, shared + 1, &to, event);

        debug!(
            "{}: {} --{}--> {} (handled by {})",
            self.definition.id,
            from,
            event,
            to,
            self.definition.qualified(&resolution.handler)
        );
        Ok(Dispatch::Transitioned { from, to, entered })
    }

    /// Run entry actions for the prefixes of `leaf` from `from_depth` down
    fn enter(&self, context: &mut C, from_depth: usize, leaf: &StatePath, event: &str) -> Vec<StatePath> {
        let mut entered = Vec::new();
        for depth in from_depth..=leaf.len() {
            let path = leaf.truncated(depth);
            let action = self
                .definition
                .node(&path)
                .and_then(|node| node.entry.as_ref())
                .and_then(|name| self.actions.get(name));
            if let Some(action) = action {
                action(context, event);
            }
            entered.push(path);
        }
        entered
    }
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.definition.id)
            .field("runtime", &self.runtime)
            .finish()
    }
}
