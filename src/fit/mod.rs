//! Elastic-region fitting.
//!
//! Responsibilities:
//!
//! - select the leading fit window of a curve
//! - estimate Young's modulus with the affine or zero-intercept model

pub mod elastic;

pub use elastic::*;
