mod app;
pub mod input;
mod views;

pub use app::PlannerApp;
