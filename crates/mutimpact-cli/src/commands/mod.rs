pub mod analyze;
pub mod validate;
