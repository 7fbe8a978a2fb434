pub mod build;
pub mod profiles;
pub mod validate;
