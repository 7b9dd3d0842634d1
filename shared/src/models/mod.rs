//! Domain models for the Agri-Forecast dashboard

mod cluster;
mod profile;
mod recommendation;
mod session;
mod tracking;

pub use cluster::*;
pub use profile::*;
pub use recommendation::*;
pub use session::*;
pub use tracking::*;
