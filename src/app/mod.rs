//! Invocation handling.
//!
//! - `action`: strict parsing of the host's query string into an [`Action`]
//! - `router`: dispatch of an action to the provider and host collaborators

pub mod action;
pub mod router;

pub use action::{Action, ActionError};
pub use router::Router;
