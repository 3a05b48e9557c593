//! The search toolset offered during exploration.

use super::entities::{ToolDefinition, ToolParameter};

pub const WEB_SEARCH: &str = "web_search";
pub const DOCUMENT_SEARCH: &str = "document_search";

pub fn web_search_tool() -> ToolDefinition {
    ToolDefinition::new(
        WEB_SEARCH,
        "Search the public web. Returns the title, page text and URL of the top results.",
    )
    .with_parameter(ToolParameter::new(
        "query",
        "Search query, phrased the way you would type it into a search engine",
        true,
    ))
}

pub fn document_search_tool() -> ToolDefinition {
    ToolDefinition::new(
        DOCUMENT_SEARCH,
        "Search the documents attached to this problem. Returns the most similar passages.",
    )
    .with_parameter(ToolParameter::new(
        "query",
        "Natural-language description of the information to look up",
        true,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_take_single_query() {
        for tool in [web_search_tool(), document_search_tool()] {
            assert_eq!(tool.parameters.len(), 1);
            assert_eq!(tool.parameters[0].name, "query");
            assert!(tool.parameters[0].required);
        }
    }
}
