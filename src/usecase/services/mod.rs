pub mod list_service;
pub mod list_view;
pub mod render;
