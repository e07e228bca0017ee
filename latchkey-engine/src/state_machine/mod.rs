//! Explicit state machine for the review session.
//!
//! This module implements a pure functional state machine for the
//! editorial review desk. The design separates:
//! - **State**: what the session knows (`SessionState`)
//! - **Events**: what happened (`Event`)
//! - **Effects**: what to do (`Effect`)
//! - **Transition**: pure function `(State, Event) -> (State, Vec<Effect>)`
//!
//! The interpreter executes effects against the attached collaborators and
//! returns result events; the store runs the dispatch loop.

pub mod effect;
pub mod event;
pub mod interpreter;
pub mod state;
pub mod store;
pub mod transition;

pub use effect::*;
pub use event::*;
pub use interpreter::{execute_effects, InterpreterContext};
pub use state::*;
pub use store::*;
pub use transition::{transition, TransitionResult};
