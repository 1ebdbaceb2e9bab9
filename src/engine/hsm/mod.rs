// Hierarchical state machine engine
//
// - State tree definition (nested states, entry actions, history pseudo-states)
// - Pure transition resolution (event -> target leaf path)
// - Runtime state (active path + history memory)
// - Machine executor running entry actions against a context

mod definition;
mod machine;
mod path;
mod resolve;
mod runtime;

pub use definition::{MachineDefinition, StateNode};
pub use machine::{Dispatch, StateMachine};
pub use path::StatePath;
pub use runtime::RuntimeState;

/// Errors raised while building or running a state machine
#[derive(Debug, thiserror::Error)]
pub enum HsmError {
    #[error("Invalid state id '{id}' under '{parent}'")]
    InvalidStateId { parent: String, id: String },

    #[error("Composite state '{state}' has no initial state")]
    MissingInitial { state: String },

    #[error("Initial state '{initial}' of '{state}' is not a child state")]
    InvalidInitial { state: String, initial: String },

    #[error("Leaf state '{state}' declares an initial state")]
    LeafWithInitial { state: String },

    #[error("History state '{state}' must be a leaf without entry or handlers")]
    MalformedHistory { state: String },

    #[error("Transition target '{target}' from '{state}' does not resolve to a state")]
    UnresolvedTarget { state: String, target: String },

    #[error("Transition '{event}' of '{state}' is invalid: {source}")]
    InvalidTransition {
        state: String,
        event: String,
        #[source]
        source: Box<HsmError>,
    },

    #[error("State '{state}' references unknown entry action '{action}'")]
    UnknownAction { state: String, action: String },

    #[error("Unknown state '{state}'")]
    UnknownState { state: String },
}
