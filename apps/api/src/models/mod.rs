pub mod profile;
pub mod selection;
