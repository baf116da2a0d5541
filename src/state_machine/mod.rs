// State machine module for the grant application workflow
//
// The transition table lives in `workflow`; guards decide whether a requested
// transition may happen, actions apply its side effects once it has.

pub mod actions;
pub mod application_state_machine;
pub mod events;
pub mod guards;
pub mod states;
pub mod workflow;

// Re-export main types for convenient access
pub use application_state_machine::ApplicationStateMachine;
pub use events::StatusUpdate;
pub use states::ApplicationStatus;
pub use workflow::{WorkflowDefinition, WorkflowRule};

// Common traits
pub use actions::TransitionAction;
pub use guards::TransitionGuard;
