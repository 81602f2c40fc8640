pub mod app;
pub mod overlay;
pub mod state;
pub mod status;
