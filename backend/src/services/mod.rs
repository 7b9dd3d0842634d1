//! Business logic services for the Agri-Forecast dashboard

pub mod dashboard;
pub mod session;
pub mod tracking;

pub use session::SessionService;
pub use tracking::SeriesSource;
