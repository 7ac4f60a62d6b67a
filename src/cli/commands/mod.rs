pub mod profile;
pub mod validate;
