use crate::config::Config;
use crate::eval::RuleTable;

use super::{Hook, HookFault, HookInput, HookResponse};

/// Gates Bash commands: split on `&&`, `||`, `|`, check each sub-command
/// against the rule table, report the first one that isn't allowed.
pub struct BashHook {
    table: RuleTable,
}

impl BashHook {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(RuleTable::from_config(config))
    }
}

impl Hook for BashHook {
    fn name(&self) -> &'static str {
        "bash"
    }

    fn handle(&self, input: &HookInput) -> Result<HookResponse, HookFault> {
        if let Some(tool) = input.tool_name.as_deref()
            && tool != "Bash"
        {
            log::debug!("bash hook ignoring tool {tool}");
            return Ok(HookResponse::allow());
        }

        let command = input.tool_command().ok_or(HookFault::MissingCommand)?;
        let result = self.table.evaluate(command);
        Ok(HookResponse::from_match(&result))
    }
}
