// Module exports for models

pub mod activity;
pub mod document;
pub mod grid;
pub mod plan;
pub mod registry;
pub mod settings;
