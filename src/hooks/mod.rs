//! PreToolUse hook protocol: input/output wire types, the [`Hook`] trait,
//! and the fail-open driver shared by every hook.

/// Compound-aware Bash command gating.
pub mod bash;
/// Web tool redirection by tool name.
pub mod web;
/// Windows backslash path rewriting for Bash commands.
pub mod win_path;

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::eval::{Decision, RuleMatch};

pub use bash::BashHook;
pub use web::WebHook;
pub use win_path::WinPathHook;

/// Event name placed in every decision payload.
pub const HOOK_EVENT_NAME: &str = "PreToolUse";

/// Reason reported when a hook faults. Deliberately carries no detail.
pub const FAIL_OPEN_REASON: &str = "hook error, defaulting to allow";

// ── Input ──

/// Hook input received from Claude Code. Every field is optional so that a
/// partial payload still reaches the hook instead of failing to parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
    /// Some callers put the command at the top level.
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub command: Option<String>,
}

impl HookInput {
    /// Parse from a JSON string.
    pub fn from_json(payload: &str) -> Result<Self, HookFault> {
        Ok(serde_json::from_str(payload)?)
    }

    /// `tool_input.command`, the field Claude Code uses for Bash.
    pub fn tool_command(&self) -> Option<&str> {
        self.tool_input.as_ref()?.command.as_deref()
    }

    /// `tool_input.command`, falling back to a top-level `command`.
    pub fn any_command(&self) -> Option<&str> {
        self.tool_command().or(self.command.as_deref())
    }

    /// What the decision log records for this input.
    pub fn subject(&self) -> &str {
        self.any_command()
            .or(self.tool_name.as_deref())
            .unwrap_or_default()
    }
}

// ── Output ──

/// `hookSpecificOutput` for PreToolUse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreToolUseOutput {
    pub hook_event_name: &'static str,
    pub permission_decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_input: Option<serde_json::Value>,
}

/// A permission decision sent to Claude Code via stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Always true: Claude Code should go on and apply the decision.
    #[serde(rename = "continue")]
    pub should_continue: bool,
    pub hook_specific_output: PreToolUseOutput,
    /// Confirmation prompt for `ask` decisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

/// Legacy `{"decision": "approve"}` passthrough: no opinion on the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Approval {
    pub decision: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HookResponse {
    Decision(HookOutput),
    Approve(Approval),
}

impl HookResponse {
    fn decision(decision: Decision, reason: Option<String>, system_message: Option<String>) -> Self {
        HookResponse::Decision(HookOutput {
            should_continue: true,
            hook_specific_output: PreToolUseOutput {
                hook_event_name: HOOK_EVENT_NAME,
                permission_decision: decision,
                permission_decision_reason: reason,
                updated_input: None,
            },
            system_message,
        })
    }

    /// Render a rule outcome: `ask` goes to `systemMessage`, anything else
    /// to `permissionDecisionReason`.
    pub fn from_match(result: &RuleMatch) -> Self {
        match result.decision {
            Decision::Ask => Self::decision(Decision::Ask, None, result.reason.clone()),
            decision => Self::decision(decision, result.reason.clone(), None),
        }
    }

    pub fn allow() -> Self {
        Self::decision(Decision::Allow, None, None)
    }

    pub fn allow_with_reason(reason: impl Into<String>) -> Self {
        Self::decision(Decision::Allow, Some(reason.into()), None)
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self::decision(Decision::Deny, Some(reason.into()), None)
    }

    /// Allow, replacing the tool input with `updated_input`.
    pub fn rewrite(reason: impl Into<String>, updated_input: serde_json::Value) -> Self {
        HookResponse::Decision(HookOutput {
            should_continue: true,
            hook_specific_output: PreToolUseOutput {
                hook_event_name: HOOK_EVENT_NAME,
                permission_decision: Decision::Allow,
                permission_decision_reason: Some(reason.into()),
                updated_input: Some(updated_input),
            },
            system_message: None,
        })
    }

    pub fn approve() -> Self {
        HookResponse::Approve(Approval {
            decision: "approve",
        })
    }

    /// The response for any fault.
    pub fn fail_open() -> Self {
        Self::allow_with_reason(FAIL_OPEN_REASON)
    }

    /// The permission decision, `"approve"` for a passthrough.
    pub fn decision_str(&self) -> &'static str {
        match self {
            HookResponse::Decision(out) => out.hook_specific_output.permission_decision.as_str(),
            HookResponse::Approve(a) => a.decision,
        }
    }

    /// Whichever message the response carries.
    pub fn message(&self) -> Option<&str> {
        match self {
            HookResponse::Decision(out) => out
                .hook_specific_output
                .permission_decision_reason
                .as_deref()
                .or(out.system_message.as_deref()),
            HookResponse::Approve(_) => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ── Hooks ──

/// Anything that stops a hook from producing its own decision.
/// Always mapped to [`HookResponse::fail_open`]; the detail only reaches the log.
#[derive(Debug, thiserror::Error)]
pub enum HookFault {
    #[error("malformed hook payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("payload has no tool_input.command")]
    MissingCommand,
    #[error("hook panicked")]
    Panicked,
}

/// A PreToolUse hook.
pub trait Hook {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Decide on one tool invocation.
    fn handle(&self, input: &HookInput) -> Result<HookResponse, HookFault>;
}

/// Which hook to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HookKind {
    /// Gate Bash commands against the rule table
    Bash,
    /// Redirect web tools to their configured alternatives
    Web,
    /// Rewrite Windows backslash paths in Bash commands
    WinPath,
}

impl HookKind {
    pub fn build(self, config: &Config) -> Box<dyn Hook> {
        match self {
            HookKind::Bash => Box::new(BashHook::from_config(config)),
            HookKind::Web => Box::new(WebHook::from_config(config)),
            HookKind::WinPath => Box::new(WinPathHook),
        }
    }
}

/// Run a hook on a raw JSON payload. Never fails: faults and panics become
/// [`HookResponse::fail_open`] and are logged.
pub fn run_hook(hook: &dyn Hook, payload: &str) -> HookResponse {
    let input = match HookInput::from_json(payload) {
        Ok(input) => input,
        Err(fault) => return fail_open(hook, "", fault),
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| hook.handle(&input)))
        .unwrap_or(Err(HookFault::Panicked));

    match outcome {
        Ok(response) => {
            crate::logging::log_decision(hook.name(), input.subject(), &response);
            response
        }
        Err(fault) => fail_open(hook, input.subject(), fault),
    }
}

fn fail_open(hook: &dyn Hook, subject: &str, fault: HookFault) -> HookResponse {
    log::warn!("{} hook fault, allowing: {fault}", hook.name());
    let response = HookResponse::fail_open();
    crate::logging::log_decision(hook.name(), subject, &response);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct PanickingHook;

    impl Hook for PanickingHook {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn handle(&self, _input: &HookInput) -> Result<HookResponse, HookFault> {
            panic!("boom")
        }
    }

    fn value(response: &HookResponse) -> serde_json::Value {
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn input_parses_nested_command() {
        let input = HookInput::from_json(r#"{"tool_name":"Bash","tool_input":{"command":"ls"}}"#)
            .unwrap();
        assert_eq!(input.tool_command(), Some("ls"));
        assert_eq!(input.subject(), "ls");
    }

    #[test]
    fn input_ignores_unknown_fields() {
        let input = HookInput::from_json(
            r#"{"session_id":"x","tool_name":"WebFetch","tool_input":{"url":"https://example.com"}}"#,
        )
        .unwrap();
        assert_eq!(input.tool_command(), None);
        assert_eq!(input.subject(), "WebFetch");
    }

    #[test]
    fn input_top_level_command_fallback() {
        let input = HookInput::from_json(r#"{"command":"dir"}"#).unwrap();
        assert_eq!(input.tool_command(), None);
        assert_eq!(input.any_command(), Some("dir"));
    }

    #[test]
    fn input_rejects_non_json() {
        assert!(matches!(
            HookInput::from_json("not json"),
            Err(HookFault::Payload(_))
        ));
    }

    #[test]
    fn deny_wire_format() {
        let response = HookResponse::from_match(&RuleMatch {
            decision: Decision::Deny,
            reason: Some("no".into()),
        });
        assert_eq!(
            value(&response),
            json!({
                "continue": true,
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "deny",
                    "permissionDecisionReason": "no"
                }
            })
        );
    }

    #[test]
    fn ask_wire_format() {
        let response = HookResponse::from_match(&RuleMatch {
            decision: Decision::Ask,
            reason: Some("sure?".into()),
        });
        assert_eq!(
            value(&response),
            json!({
                "continue": true,
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "ask"
                },
                "systemMessage": "sure?"
            })
        );
        assert_eq!(response.message(), Some("sure?"));
    }

    #[test]
    fn allow_wire_format() {
        assert_eq!(
            value(&HookResponse::allow()),
            json!({
                "continue": true,
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "allow"
                }
            })
        );
    }

    #[test]
    fn rewrite_wire_format() {
        let response = HookResponse::rewrite("fixed", json!({"command": "ls C:/x"}));
        let v = value(&response);
        assert_eq!(v["hookSpecificOutput"]["permissionDecision"], "allow");
        assert_eq!(v["hookSpecificOutput"]["updatedInput"]["command"], "ls C:/x");
    }

    #[test]
    fn approve_wire_format() {
        assert_eq!(value(&HookResponse::approve()), json!({"decision": "approve"}));
        assert_eq!(HookResponse::approve().decision_str(), "approve");
    }

    #[test]
    fn malformed_payload_fails_open() {
        let config = Config::default();
        let hook = HookKind::Bash.build(&config);
        assert_eq!(run_hook(hook.as_ref(), "{not json"), HookResponse::fail_open());
    }

    #[test]
    fn panic_fails_open() {
        let response = run_hook(&PanickingHook, "{}");
        assert_eq!(response, HookResponse::fail_open());
    }

    #[test]
    fn fail_open_reason_is_generic() {
        let response = run_hook(&PanickingHook, "{}");
        assert_eq!(response.message(), Some(FAIL_OPEN_REASON));
        assert!(!response.to_json().unwrap().contains("boom"));
    }
}
