pub mod agency_index;
pub mod analytics;
pub(crate) mod api;
pub mod components;
pub mod config;
pub mod controller;
pub mod dropdown;
pub mod error;
pub(crate) mod global_state;
pub mod navigation;
pub mod suggestion;
pub mod tracker;

pub use components::agency_search::AgencySearch;
pub use config::SearchConfig;
