//! VN100 market data and tools for the vnfin financial assistant
//!
//! This crate connects the tool-calling agent to Vietnamese market data:
//!
//! - Read-only queries over the VN100 MySQL database (listings, industries,
//!   yearly financial statements, schema introspection)
//! - Composite ranking of companies within an industry
//! - Current price lookup with fallback across public price sources
//! - Tavily web search
//! - The LLM tools wrapping all of the above, the Vietnamese system prompt,
//!   and [`assistant::build_agent`] which assembles a ready agent
//!
//! # Example
//!
//! ```rust,ignore
//! use vnfin_agent::AgentConfig;
//! use vnfin_llm::create_provider;
//! use vnfin_market::{MarketConfig, build_agent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = create_provider("gpt-4o")?;
//!     let config = MarketConfig::from_env()?;
//!     let mut agent = build_agent(provider, &config, AgentConfig::for_model("gpt-4o"))?;
//!
//!     let answer = agent.process_user_message("Top 3 ngân hàng tốt nhất?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod price;
pub mod prompts;
pub mod scoring;
pub mod search;
pub mod symbol;
pub mod tools;

pub use assistant::{build_agent, build_registry};
pub use config::{DatabaseConfig, MarketConfig};
pub use db::MarketDb;
pub use error::{MarketError, Result};
pub use price::{PriceChain, PriceQuote, PriceSource};
pub use scoring::{ScoredSymbol, ScoringOptions};
pub use search::{SearchResult, TavilyClient};
pub use tools::readable_tool_name;
