//! DTOs for the tool endpoints.

use serde::Serialize;

use crate::tools::{ToolDescriptor, ToolOutput};

#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResponse {
    pub tool: String,
    pub content: String,
    pub is_error: bool,
}

impl From<ToolOutput> for ToolCallResponse {
    fn from(output: ToolOutput) -> Self {
        Self {
            tool: output.tool,
            content: output.content,
            is_error: output.is_error,
        }
    }
}
