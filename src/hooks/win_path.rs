use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use super::{Hook, HookFault, HookInput, HookResponse};

/// A backslash followed by something other than whitespace or another backslash.
static UNESCAPED_BACKSLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[^\s\\]").expect("valid regex"));

/// `C:\...` through the end of the path-like run.
static ABSOLUTE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]:\\[^\\]*(?:\\[^\\]*)*").expect("valid regex"));

/// `dir\sub\file` starting at the beginning of the command or after whitespace.
static RELATIVE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)[^\s\\?:*"]+\\+(?:[^\\?:*"\s]+\\*)+"#).expect("valid regex")
});

const REWRITE_REASON: &str = "converted Windows paths to forward slashes to avoid shell escaping";

/// Rewrites Windows-style backslash paths in Bash commands to forward slashes.
pub struct WinPathHook;

impl Hook for WinPathHook {
    fn name(&self) -> &'static str {
        "win-path"
    }

    fn handle(&self, input: &HookInput) -> Result<HookResponse, HookFault> {
        let command = input.any_command().unwrap_or_default();
        if !command.contains('\\') || !UNESCAPED_BACKSLASH.is_match(command) {
            return Ok(HookResponse::approve());
        }

        let fixed = fix_windows_paths(command);
        if fixed == command {
            return Ok(HookResponse::approve());
        }

        log::debug!("rewrote {command:?} -> {fixed:?}");
        Ok(HookResponse::rewrite(REWRITE_REASON, json!({ "command": fixed })))
    }
}

/// Windows-style paths in a command, in order of appearance, without duplicates.
pub fn extract_windows_paths(command: &str) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    let found = ABSOLUTE_PATH
        .find_iter(command)
        .map(|m| m.as_str())
        .chain(RELATIVE_PATH.find_iter(command).map(|m| m.as_str().trim()));

    for path in found {
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }
    paths
}

/// Replace every backslash inside detected paths with `/`.
///
/// Longer paths are replaced first so a path that contains another is
/// rewritten whole.
pub fn fix_windows_paths(command: &str) -> String {
    let mut paths = extract_windows_paths(command);
    paths.sort_by_key(|p| std::cmp::Reverse(p.len()));

    paths.iter().fold(command.to_string(), |fixed, path| {
        fixed.replace(path.as_str(), &path.replace('\\', "/"))
    })
}
