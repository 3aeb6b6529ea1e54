//! Console progress output for agent events

use async_trait::async_trait;
use serde_json::Value;
use vnfin_agent::AgentEventListener;
use vnfin_market::readable_tool_name;

/// Prints tool progress with Vietnamese tool labels
pub struct ConsoleListener;

#[async_trait]
impl AgentEventListener for ConsoleListener {
    async fn on_tool_start(&self, _id: &str, name: &str, _input: &Value) {
        println!("🔧 {}...", readable_tool_name(name));
    }

    async fn on_tool_done(
        &self,
        _id: &str,
        name: &str,
        result: Result<&str, &str>,
        duration_ms: u64,
    ) {
        match result {
            Ok(_) => println!("✅ {} ({duration_ms} ms)", readable_tool_name(name)),
            Err(error) => println!("⚠️ {}: {error}", readable_tool_name(name)),
        }
    }

    async fn on_assistant_text(&self, text: &str) {
        if !text.trim().is_empty() {
            println!("💭 {}", text.trim());
        }
    }
}
