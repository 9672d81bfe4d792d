//! The voting dashboard: state owner, layout and panels.

pub mod components;
pub mod renderer;
pub mod state;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::{DashboardState, UserAction};
