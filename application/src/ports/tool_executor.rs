//! Tool Executor port
//!
//! Defines the interface for executing the tools the model calls during
//! search actions.

use async_trait::async_trait;
use proposal_domain::{ProblemId, SearchResults, ToolCall, ToolDefinition, ToolError};

/// Port for tool execution
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Definitions of all available tools
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.definitions().iter().any(|tool| tool.name == name)
    }

    /// Execute a tool call on behalf of `problem_id`
    async fn execute(
        &self,
        problem_id: &ProblemId,
        call: &ToolCall,
    ) -> Result<SearchResults, ToolError>;
}
