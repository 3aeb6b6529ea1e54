//! Tool management framework for vnfin
//!
//! Tools are the functions the LLM may call during a conversation turn.
//! Each tool carries its own name, description and argument schema, and is
//! registered in a [`ToolRegistry`] shared with the agent.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{Tool, parse_params, render_output};
