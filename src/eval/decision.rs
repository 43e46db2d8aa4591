use serde::Serialize;

use crate::config::RuleDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Allow,
    Ask,
    Deny,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Ask => "ask",
            Decision::Deny => "deny",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Ask => "ASK",
            Decision::Deny => "DENY",
        }
    }
}

impl From<RuleDecision> for Decision {
    fn from(d: RuleDecision) -> Self {
        match d {
            RuleDecision::Deny => Decision::Deny,
            RuleDecision::Ask => Decision::Ask,
        }
    }
}

/// Outcome for one sub-command, or for a whole command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub decision: Decision,
    /// User-facing text; `None` for a plain allow.
    pub reason: Option<String>,
}

impl RuleMatch {
    pub fn allow() -> Self {
        Self {
            decision: Decision::Allow,
            reason: None,
        }
    }

    pub fn is_allow(&self) -> bool {
        self.decision == Decision::Allow
    }
}
