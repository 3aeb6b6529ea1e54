//! Tool registry for managing available tools

use crate::Tool;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use vnfin_llm::ToolDefinition;

#[derive(Default)]
struct Inner {
    // Lowercased name -> tool
    tools: HashMap<String, Arc<dyn Tool>>,
    // Lowercased names in registration order
    order: Vec<String>,
}

/// Registry for managing tools
///
/// Lookups are case-insensitive. Definitions are listed in registration
/// order so the model always sees the same tool list.
#[derive(Default)]
pub struct ToolRegistry {
    inner: RwLock<Inner>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let key = tool.name().to_lowercase();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.tools.insert(key.clone(), tool).is_some() {
            tracing::warn!(tool = %key, "Replacing already registered tool");
        } else {
            inner.order.push(key);
        }
    }

    /// Get a tool by name, ignoring case
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.tools.get(&name.trim().to_lowercase()).cloned()
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .order
            .iter()
            .filter_map(|name| inner.tools.get(name).cloned())
            .collect()
    }

    /// Tool definitions to advertise to the LLM
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools().iter().map(|t| t.definition()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
