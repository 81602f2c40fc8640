pub mod comparator;
pub mod page_window;
pub mod predicate;
pub mod presets;
pub mod text;
