//! HTTP handlers for the Agri-Forecast API

pub mod health;
pub mod reference;
pub mod session;

pub use health::health_check;
pub use reference::{get_cluster, get_crop_rules, get_profile_fields, list_clusters};
pub use session::{apply_action, create_session, delete_session, get_session, get_tracking_panel};
