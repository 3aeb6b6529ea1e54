//! Shared utilities for vnfin
//!
//! Logging setup and typed access to environment configuration, used by
//! every other crate in the workspace.

pub mod env;
pub mod logging;

pub use env::{EnvError, load_dotenv};
pub use logging::{LogFormat, init_tracing, init_tracing_with};
