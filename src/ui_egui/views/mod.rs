pub mod activity_list;
pub mod allocation_panel;
pub(crate) mod palette;
pub mod week_grid;
