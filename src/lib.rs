pub mod artifact;
pub mod compile;
pub mod error;
pub mod parse;
pub mod validate;
