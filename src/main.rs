//! cc-permission-hooks: PreToolUse hooks for Claude Code.
//!
//! Reads the hook payload as JSON (from the positional argument, else stdin)
//! and writes one permission decision to stdout. Always exits 0: any
//! failure becomes an `allow` decision.

use std::io::Read;

use clap::Parser;

use cc_permission_hooks::config::{CONFIG_ENV_VAR, Config};
use cc_permission_hooks::hooks::{self, HookKind, HookResponse};
use cc_permission_hooks::logging;

#[derive(Parser, Debug)]
#[command(name = "cc-permission-hooks", version, about)]
struct Cli {
    /// Which hook to run
    #[arg(value_enum, required_unless_present = "dump_config")]
    hook: Option<HookKind>,

    /// Hook payload as JSON; read from stdin when omitted
    payload: Option<String>,

    /// Config file to use instead of the defaults and user overlay
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    logging::init();
    std::panic::set_hook(Box::new(|info| log::error!("panic: {info}")));

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    if cli.dump_config {
        match config.to_toml_string() {
            Ok(toml) => print!("{toml}"),
            Err(e) => {
                eprintln!("cc-permission-hooks: cannot serialize config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let Some(kind) = cli.hook else {
        return;
    };
    let hook = kind.build(&config);

    let payload = match cli.payload {
        Some(payload) => payload,
        None => {
            let mut input = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut input) {
                log::warn!("failed to read stdin: {e}");
            }
            input
        }
    };

    let response = hooks::run_hook(hook.as_ref(), &payload);
    let json = response
        .to_json()
        .or_else(|_| HookResponse::fail_open().to_json())
        .unwrap_or_default();
    println!("{json}");
}
