//! Entry point for the `workspace` command.
//!
//! Parses the command line, runs one command against the MATE desktop and
//! prints its output.  Errors are printed to stdout as `Error: <message>`
//! and make the process exit with status 1.

use log::{debug, info, LevelFilter};
use std::process::ExitCode;
use wsorder::app::App;
use wsorder::command::Invocation;
use wsorder::config::Config;
use wsorder::engine::Reorderer;
use wsorder::mate::desktop::MateDesktop;
use wsorder::mate::dialog::ZenityDialog;

/// Resolve the config directory (`$XDG_CONFIG_HOME/wsorder`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("wsorder")
}

/// Try to load the config from `$XDG_CONFIG_HOME/wsorder/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = Invocation::parse(&args);

    let mut logger = env_logger::Builder::from_default_env();
    if matches!(&invocation, Ok(inv) if inv.debug) {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let invocation = match invocation {
        Ok(inv) => inv,
        Err(e) => {
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("command: {:?}", invocation.command);

    let config = load_config();
    let engine = Reorderer::new(MateDesktop::new(config.backend.clone()))
        .with_new_name(config.workspace.new_name.clone());
    let app = App::new(engine, ZenityDialog::new(config.backend.zenity.clone()))
        .with_settle_delay(config.workspace.settle_delay());

    match app.run(&invocation.command) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
