//! Tool-calling conversation agent for vnfin
//!
//! [`ToolsCallingAgent`] drives the turn protocol between an LLM and the
//! registered tools: it sends the conversation with the tool definitions,
//! executes any tool calls the model requests, feeds the results back and
//! repeats until the model answers. Once a turn completes, the intermediate
//! tool traffic is dropped so that history only keeps each user question
//! and its final answer.

pub mod agent;
pub mod config;
pub mod error;
pub mod events;
pub mod memory;

pub use agent::{ToolsCallingAgent, ToolsCallingAgentBuilder};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use events::{AgentEventListener, NoOpListener, ResponseStreamer};
pub use memory::ConversationMemory;
