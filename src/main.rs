//! `note` - weekly Markdown notes
//!
//! Thin entry point: logging, argument parsing, help/version output, and
//! exit codes. The actual implementation is in the `weeknote` library.

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use weeknote::render::Renderer;
use weeknote::{App, Args, Config, config};

const README: &str = include_str!("../README.md");

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("NOTE_LOG", "warn")).init();

    let args = Args::parse();

    if args.short_help || args.full_help {
        print_usage(args.full_help);
        return ExitCode::SUCCESS;
    }

    if args.version {
        print!("v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config_path = args.config.clone().or_else(config::default_config_path);
    let mut config = Config::load(&exe_name(), config_path.as_deref())?;
    args.apply(&mut config);
    log::debug!("resolved configuration: {:?}", config);

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();

    App::new(config, args.week_offset(), args.mode())
        .with_color(color)
        .run(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Binary name, used for the default notes directory (`~/note`)
fn exe_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "note".to_string())
}

fn print_usage(with_readme: bool) {
    let mut cmd = Args::command();
    let mut usage = cmd.render_help().to_string();
    if with_readme {
        usage.push_str("\nREADME\n");
        usage.push_str(&Renderer::new(false).render(README));
    }
    eprint!("{}", usage);
}
