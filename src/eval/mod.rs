pub mod context;
pub mod decision;

pub use context::CommandContext;
pub use decision::{Decision, RuleMatch};

use crate::config::{Config, Rule, RuleDecision};
use crate::parse;

/// Whether `rule` applies to a canonical command name.
///
/// `find` matches `find` and `find .`, but not `findutils`.
/// `npm install` matches `npm install` only.
pub fn rule_matches(rule: &Rule, name: &str) -> bool {
    name == rule.pattern
        || name
            .strip_prefix(rule.pattern.as_str())
            .is_some_and(|rest| rest.starts_with(' '))
}

/// Ordered Bash rules, built once per invocation from configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build the table from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bash.rules.clone())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule (table order) matching a canonical name.
    pub fn find(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule_matches(rule, name))
    }

    /// Evaluate one sub-command.
    pub fn evaluate_single(&self, ctx: &CommandContext) -> RuleMatch {
        let Some(rule) = self.find(&ctx.name) else {
            return RuleMatch::allow();
        };

        // Reading stdin, not touching the filesystem.
        if ctx.pipe_receiver && rule.allow_in_pipe_receiver {
            log::debug!("{:?} allowed as pipe receiver by rule {:?}", ctx.raw, rule.pattern);
            return RuleMatch::allow();
        }

        RuleMatch {
            decision: rule.decision.into(),
            reason: Some(rule_reason(rule)),
        }
    }

    /// Evaluate a full command line, stopping at the first sub-command that isn't allowed.
    pub fn evaluate(&self, command: &str) -> RuleMatch {
        let split = parse::split_command(command);

        for index in 0..split.segments.len() {
            let Some(ctx) = CommandContext::from_segment(&split.segments, index) else {
                break;
            };
            let result = self.evaluate_single(&ctx);
            log::debug!(
                "  [{}] {:?} pipe={} -> {}",
                index,
                ctx.raw,
                ctx.pipe_receiver,
                result.decision.label()
            );
            if !result.is_allow() {
                return result;
            }
        }

        RuleMatch::allow()
    }
}

fn rule_reason(rule: &Rule) -> String {
    let name = rule.display_name();
    let suggestion = rule.suggestion.trim();
    match (rule.decision, suggestion.is_empty()) {
        (RuleDecision::Deny, true) => format!("⚠️ {name} command blocked"),
        (RuleDecision::Deny, false) => format!("⚠️ {name} command blocked, {suggestion}"),
        (RuleDecision::Ask, true) => format!("⚠️ {name} command requires confirmation"),
        (RuleDecision::Ask, false) => {
            format!("⚠️ {name} command requires confirmation: {suggestion}")
        }
    }
}
