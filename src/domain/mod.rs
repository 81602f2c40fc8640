pub mod entities;
pub mod list;
