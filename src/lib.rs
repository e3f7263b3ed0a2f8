//! Weekly planner: lay out a repeating week at 5-minute resolution and view
//! it at coarser zoom levels.

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
