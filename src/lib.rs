//! cc-permission-hooks: PreToolUse hooks for Claude Code.
//!
//! The main hook gates Bash commands. A command line is split at `&&`, `||`
//! and `|` into sub-commands; each is reduced to a one- or two-word name and
//! checked against an ordered rule table, where the first matching rule
//! decides [`eval::Decision::Deny`] or [`eval::Decision::Ask`]. Rules can let
//! a command through when it only reads piped input (`ls | grep foo`). The
//! first sub-command that isn't allowed decides for the whole line.
//!
//! Two smaller hooks ride along: one blocks web tools that have a configured
//! alternative, one rewrites Windows backslash paths in Bash commands.
//!
//! Every hook fails open: a malformed payload, a broken config, or a fault
//! inside a hook yields `allow`.
//!
//! # Architecture
//!
//! - **[`parse`]** — Operator splitting, pipe-receiver detection, command-name extraction.
//! - **[`eval`]** — Rule table, rule matching, decision types.
//! - **[`hooks`]** — Wire types, the [`hooks::Hook`] trait, the fail-open driver, the three hooks.
//! - **[`config`]** — Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]** — Decision logging to `~/.local/share/cc-permission-hooks/decisions.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Rule matching and decision engine.
pub mod eval;
/// Hook protocol, fail-open driver, and hook implementations.
pub mod hooks;
/// File-based decision logging.
pub mod logging;
/// Command splitting and name extraction.
pub mod parse;

use eval::RuleMatch;

/// Evaluate a command string against the embedded default rules.
///
/// This is the main entry point for tests and simple usage.
/// For CLI usage with a user config, build a [`eval::RuleTable`] directly.
pub fn evaluate(command: &str) -> RuleMatch {
    let config = config::Config::default_config().unwrap_or_default();
    eval::RuleTable::from_config(&config).evaluate(command)
}
