//! SkyAI dashboard: state container and terminal view.

pub mod chart;
pub mod dashboard;
pub mod format;
pub mod icons;
pub mod state;
pub mod view;

pub use dashboard::{build_locator, Dashboard, DashboardOptions, LoadOutcome};
pub use icons::WeatherIcon;
pub use state::DashboardSnapshot;
pub use view::render;
