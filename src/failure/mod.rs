//! Failure-point analysis: ultimate strength, fracture strain and toughness.

pub mod analyzer;

pub use analyzer::*;
