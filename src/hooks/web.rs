use std::collections::BTreeMap;

use crate::config::Config;

use super::{Hook, HookFault, HookInput, HookResponse};

/// Blocks web tools that have a configured alternative and says what to use instead.
pub struct WebHook {
    mappings: BTreeMap<String, String>,
}

impl WebHook {
    pub fn new(mappings: BTreeMap<String, String>) -> Self {
        Self { mappings }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.web.tool_mappings.clone())
    }

    /// The suggestion for a blocked tool, if it has one.
    pub fn replacement(&self, tool: &str) -> Option<&str> {
        self.mappings.get(tool).map(String::as_str)
    }
}

impl Hook for WebHook {
    fn name(&self) -> &'static str {
        "web"
    }

    fn handle(&self, input: &HookInput) -> Result<HookResponse, HookFault> {
        let tool = input.tool_name.as_deref().unwrap_or_default();
        if tool.is_empty() {
            return Ok(HookResponse::allow_with_reason("tool name empty, allowed"));
        }

        Ok(match self.replacement(tool) {
            Some(suggestion) => HookResponse::deny(format!("⚠️ {tool} tool blocked, {suggestion}")),
            None => HookResponse::allow_with_reason("tool check passed"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook() -> WebHook {
        WebHook::new(BTreeMap::from([
            ("WebFetch".to_string(), "use mcp__fetch".to_string()),
            ("WebSearch".to_string(), "use mcp__search".to_string()),
        ]))
    }

    fn handle(json: &str) -> HookResponse {
        hook().handle(&HookInput::from_json(json).unwrap()).unwrap()
    }

    #[test]
    fn blocks_mapped_tool() {
        let response = handle(r#"{"tool_name":"WebFetch","tool_input":{"url":"https://example.com"}}"#);
        assert_eq!(response.decision_str(), "deny");
        assert_eq!(response.message(), Some("⚠️ WebFetch tool blocked, use mcp__fetch"));
    }

    #[test]
    fn blocks_search() {
        let response = handle(r#"{"tool_name":"WebSearch","tool_input":{"query":"test"}}"#);
        assert_eq!(response.decision_str(), "deny");
    }

    #[test]
    fn passes_other_tools() {
        let response = handle(r#"{"tool_name":"Read","tool_input":{}}"#);
        assert_eq!(response, HookResponse::allow_with_reason("tool check passed"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(handle(r#"{"tool_name":"webfetch"}"#).decision_str(), "allow");
    }

    #[test]
    fn empty_tool_name_allows() {
        assert_eq!(
            handle(r#"{"tool_name":""}"#),
            HookResponse::allow_with_reason("tool name empty, allowed")
        );
        assert_eq!(handle("{}").decision_str(), "allow");
    }

    #[test]
    fn empty_mappings_allow_everything() {
        let hook = WebHook::new(BTreeMap::new());
        let input = HookInput::from_json(r#"{"tool_name":"WebFetch"}"#).unwrap();
        assert_eq!(hook.handle(&input).unwrap().decision_str(), "allow");
    }
}
