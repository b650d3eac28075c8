// Core of the space weather explorer, shared by the TUI binary and tests
pub mod catalog;
pub mod config;
pub mod domain;
pub mod donki;
pub mod error;
pub mod geo;
pub mod globe;
pub mod query;

pub use domain::{EventCategory, MarkerColor, Operation, OutputFormat};
