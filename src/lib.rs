pub mod actions;
pub mod arguments;
pub mod error;
pub mod gradle;
pub mod version;
