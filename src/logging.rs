use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::hooks::HookResponse;

/// Env var selecting the log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub const LOG_ENV_VAR: &str = "CC_PERMISSION_HOOKS_LOG";

/// Log file location, relative to `$HOME`.
const LOG_PATH: &str = ".local/share/cc-permission-hooks/decisions.log";

/// Route the `log` facade to ~/.local/share/cc-permission-hooks/decisions.log.
/// Best-effort: if the file can't be opened nothing is logged (logging must
/// never block the hook, and stdout belongs to the decision payload).
pub fn init() {
    let level = level_from_env();
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    else {
        return;
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = WriteLogger::init(level, config, file);
}

fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(LOG_PATH))
}

/// Record one hook decision as `hook<TAB>decision<TAB>subject<TAB>message`.
pub fn log_decision(hook: &str, subject: &str, response: &HookResponse) {
    log::info!("{}", decision_line(hook, subject, response));
}

fn decision_line(hook: &str, subject: &str, response: &HookResponse) -> String {
    let subject: String = subject.chars().take(200).collect();
    let subject = subject.replace(['\n', '\t'], " ");
    let message = response.message().unwrap_or_default().replace('\n', "; ");
    format!("{hook}\t{}\t{subject}\t{message}", response.decision_str())
}
