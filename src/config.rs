use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Env var naming an explicit config file (takes the place of defaults + overlay).
pub const CONFIG_ENV_VAR: &str = "CC_PERMISSION_HOOKS_CONFIG";

/// User overlay location, relative to `$HOME`.
const OVERLAY_PATH: &str = ".config/cc-permission-hooks/config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("embedded default config is invalid: {0}")]
    Embedded(toml::de::Error),
    #[error("cannot expand config path {path}: {message}")]
    Expand { path: String, message: String },
}

// ── Final (merged) config types ──

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bash: BashConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BashConfig {
    /// Checked in order; the first matching rule decides.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebConfig {
    /// Tool name → suggested alternative shown when the tool is blocked.
    #[serde(default)]
    pub tool_mappings: BTreeMap<String, String>,
}

/// A single Bash command rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    /// Canonical command name: one word (`find`) or two (`npm install`).
    pub pattern: String,
    pub decision: RuleDecision,
    #[serde(default)]
    pub suggestion: String,
    /// Let the command through when it reads from a pipe.
    #[serde(default)]
    pub allow_in_pipe_receiver: bool,
}

impl Rule {
    pub fn new(pattern: &str, decision: RuleDecision, suggestion: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            decision,
            suggestion: suggestion.to_string(),
            allow_in_pipe_receiver: false,
        }
    }

    /// Builder-style toggle for [`Rule::allow_in_pipe_receiver`].
    pub fn allowed_in_pipe(mut self) -> Self {
        self.allow_in_pipe_receiver = true;
        self
    }

    /// The part of the pattern shown to the user (its first word).
    pub fn display_name(&self) -> &str {
        self.pattern.split(' ').next().unwrap_or_default()
    }

    /// Canonical names are at most two words, so longer or empty patterns never match.
    fn can_match(&self) -> bool {
        let words = self.pattern.split(' ').count();
        !self.pattern.trim().is_empty() && words <= 2
    }
}

/// What a matching rule does (when no pipe-receiver exception applies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDecision {
    Deny,
    Ask,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    bash: BashOverlay,
    #[serde(default)]
    web: WebOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct BashOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    rules: Vec<Rule>,
    /// Patterns whose default rules are dropped before `rules` are appended.
    #[serde(default)]
    remove_rules: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct WebOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    tool_mappings: BTreeMap<String, String>,
    #[serde(default)]
    remove_tool_mappings: Vec<String>,
}

// ── Merge logic ──

/// Merge user rules into the default rule list.
/// In replace mode: user rules replace the defaults entirely.
/// In merge mode: remove by pattern first, then append (order kept, so
/// appended rules only win for patterns no earlier rule covers).
fn merge_rules(base: &mut Vec<Rule>, add: Vec<Rule>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|rule| !remove.contains(&rule.pattern));
        for rule in add {
            if !base.contains(&rule) {
                base.push(rule);
            }
        }
    }
}

impl Config {
    /// Load the embedded default configuration.
    pub fn default_config() -> Result<Self, ConfigError> {
        toml::from_str(DEFAULT_CONFIG).map_err(ConfigError::Embedded)
    }

    /// Parse a complete config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read a complete config file (no defaults, no overlay).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration, failing open.
    ///
    /// Resolution order:
    /// 1. `explicit` path (from `--config` or [`CONFIG_ENV_VAR`]), read as a full config
    /// 2. Otherwise embedded defaults, merged with ~/.config/cc-permission-hooks/config.toml
    ///
    /// Any error yields an empty config: no rules, no mappings, everything allowed.
    pub fn load(explicit: Option<&str>) -> Self {
        match Self::try_load(explicit) {
            Ok(config) => {
                config.warn_unmatchable_rules();
                config
            }
            Err(e) => {
                log::warn!("config load failed, continuing with no rules: {e}");
                Self::default()
            }
        }
    }

    fn try_load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = explicit {
            let path = expand_path(raw)?;
            log::debug!("loading config from {}", path.display());
            return Self::from_file(&path);
        }

        let mut config = Self::default_config()?;
        if let Some(overlay) = Self::load_overlay()? {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }

    /// Read the user overlay, if one exists.
    fn load_overlay() -> Result<Option<ConfigOverlay>, ConfigError> {
        let Some(home) = std::env::var_os("HOME") else {
            return Ok(None);
        };
        let path = Path::new(&home).join(OVERLAY_PATH);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let b = overlay.bash;
        merge_rules(&mut self.bash.rules, b.rules, &b.remove_rules, b.replace);

        let w = overlay.web;
        if w.replace {
            self.web.tool_mappings = w.tool_mappings;
        } else {
            self.web
                .tool_mappings
                .retain(|tool, _| !w.remove_tool_mappings.contains(tool));
            self.web.tool_mappings.extend(w.tool_mappings);
        }
    }

    fn warn_unmatchable_rules(&self) {
        for rule in self.bash.rules.iter().filter(|r| !r.can_match()) {
            log::warn!("rule pattern {:?} can never match a command", rule.pattern);
        }
    }

    /// Serialize the effective config for `--dump-config`.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

/// Expand `~` and `$VARS` in a user-supplied config path.
fn expand_path(raw: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| ConfigError::Expand {
            path: raw.to_string(),
            message: e.to_string(),
        })
}
