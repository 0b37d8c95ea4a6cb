//! `tensile-curves` library crate.
//!
//! Post-processing for tensile test (stress-strain) data: elastic modulus fit,
//! ultimate strength, fracture strain and toughness, for one curve or two side by
//! side.
//!
//! The binary (`tensile`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable from other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod failure;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
