pub mod persona;
pub mod profile;
pub mod project;
pub mod staged_item;
