//! Core abstractions shared across the analyst-desk workspace.
//!
//! This crate defines the seams the rest of the system plugs into:
//!
//! - The [`Agent`] trait implemented by anything that turns a request into text
//! - The [`Tool`] trait and [`ToolRegistry`] for model-callable functions
//! - The shared [`Error`] type

pub mod agent;
pub mod error;
pub mod registry;
pub mod tool;

pub use agent::Agent;
pub use error::{Error, Result};
pub use registry::ToolRegistry;
pub use tool::Tool;
