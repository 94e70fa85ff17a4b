//! This crate provides a headless console to drive the Tinsel scene one frame at a time.

mod command;
mod logging;
mod parse;

use self::{
    command::{Console, HELP_TEXT},
    parse::parse_command,
};
use clap::Parser;
use color_eyre::{eyre::Context, Result};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{io, path::PathBuf};
use termion::{color, style};
use tinsel_scene::{snow_channel, SceneConfig, SceneContext};
use tracing::info;

/// Drive the Tinsel scene from the command line.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The config file for the scene. A default one is written here if it doesn't exist.
    #[arg(default_value = "tinsel.ron")]
    config: PathBuf,

    /// The directory for log files.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Mount the scene with this seed instead of the one in the config.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = logging::init_tracing(&args.log_dir);

    let mut config = SceneConfig::from_file(&args.config);
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let (snow_switch, snow_signal) = snow_channel();
    let scene = SceneContext::mount(config, snow_signal);
    info!(seed = scene.seed(), config = ?args.config, "Started console");

    let mut console = Console::new(scene, snow_switch, args.config);
    let mut prompt = DefaultEditor::new()?;

    let prompt_string = format!(
        "{}{}==> {}",
        style::Bold,
        color::Fg(color::LightCyan),
        style::Reset
    );

    println!("{HELP_TEXT}\n");

    let mut stdout = io::stdout();

    loop {
        match prompt.readline(&prompt_string) {
            Ok(input) => {
                prompt.add_history_entry(&input)?;
                match parse_command(input.trim()) {
                    Ok(("", command)) => console
                        .execute(command, &mut stdout)
                        .wrap_err("Failed to write to stdout")?,
                    Ok((extra, _)) => eprintln!(
                        "{}{}ERROR:{} Trailing input: `{extra}`",
                        style::Bold,
                        color::Fg(color::Red),
                        style::Reset
                    ),
                    Err(error) => eprintln!(
                        "{}{}ERROR:{} Failed to parse input: `{error:?}`",
                        style::Bold,
                        color::Fg(color::Red),
                        style::Reset
                    ),
                };
            }
            Err(ReadlineError::Interrupted) => (),
            Err(ReadlineError::Eof) => return Ok(()),
            Err(ReadlineError::Io(e)) => return Err(e).wrap_err("IO error when reading prompt"),
            Err(error) => return Err(error).wrap_err("Unknown error when reading prompt"),
        };
    }
}
