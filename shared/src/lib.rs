//! Shared types and domain logic for the Agri-Forecast dashboard
//!
//! This crate holds everything that does not need a server: the session
//! state machine, the placeholder classifier, the reference tables, the
//! synthetic yield series and the chart builders. The backend and the WASM
//! module both build on it.

pub mod charts;
pub mod models;
pub mod reference;
pub mod types;
pub mod validation;

pub use charts::*;
pub use models::*;
pub use reference::*;
pub use types::*;
pub use validation::*;
