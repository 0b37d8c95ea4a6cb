//! Mathematical utilities: least squares and numerical integration.

pub mod integrate;
pub mod ols;

pub use integrate::*;
pub use ols::*;
