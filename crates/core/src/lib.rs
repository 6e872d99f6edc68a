//! Pure domain logic for the Skirmish game backend.
//!
//! Everything in this crate is side-effect free: status enums, the
//! relationship/access decision functions, lifecycle transition guards,
//! and pagination math. The persistence layer (`skirmish-db`) fetches
//! state and applies transitions; this crate decides whether they are
//! allowed.

pub mod access;
pub mod error;
pub mod listing;
pub mod social;
pub mod types;
