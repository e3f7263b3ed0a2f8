// Service module exports

pub mod aggregation;
pub mod allocation;
pub mod database;
pub mod paint;
pub mod reorder;
pub mod settings;
pub mod storage;
pub mod workspace;
