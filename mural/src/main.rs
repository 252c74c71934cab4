use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use mural::command::bus::{CommandBus, CommandClient};
use mural::config::AppConfig;
use mural::{Command, GuiData};
use mural_audio::Speaker;
use mural_core::types::Position;

#[derive(Parser, Debug)]
#[command(name = "mural")]
#[command(about = "Load a game module's UI assets and run gui commands against it.")]
struct Cli {
    /// Configuration file, written back on exit.
    #[arg(short, long, default_value = ".mural")]
    config: PathBuf,

    /// Read commands from this file instead of standard input.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Also load the descriptors of this chapter.
    #[arg(long)]
    chapter: Option<String>,

    #[arg(long)]
    debug: bool,
}

fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match AppConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}, using defaults", e);
            AppConfig::default()
        }
    }
}

fn start_session(config: AppConfig, chapter: Option<&str>) -> GuiData {
    let speaker = Arc::new(Speaker::with_default_device());
    let mut gui = GuiData::new(config.into_shared(), speaker);

    if let Err(e) = gui.load_ui() {
        log::error!("unable to load ui assets: {:#}", e);
    }
    if let Err(e) = gui.load_module() {
        log::error!("unable to load module: {:#}", e);
    }
    if let Some(chapter) = chapter {
        let loaded = gui.load_chapter(chapter);
        log::info!("chapter {}: {} descriptor(s)", chapter, loaded);
    }

    let menu = gui.open_menu(Vec::new());
    gui.set_menu(Some(menu));
    gui
}

/// Sends every command line of `input` through the bus and prints the results.
fn run_script(input: Box<dyn BufRead + Send>, client: CommandClient) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("unable to read command: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some(command) = Command::parse(line) {
            println!("{}", client.call(command));
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config);
    config.debug |= cli.debug;
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(config.logger_config().filter()));
    log::info!("mural {} using {:?}", env!("CARGO_PKG_VERSION"), config.gui_path());

    let frame = Duration::from_secs_f64(1.0 / f64::from(config.max_fps.max(1)));
    let mut gui = start_session(config, cli.chapter.as_deref());

    let input: Box<dyn BufRead + Send> = match &cli.script {
        Some(path) => {
            let file = std::fs::File::open(path).with_context(|| format!("opening script {:?}", path))?;
            Box::new(std::io::BufReader::new(file))
        }
        None => Box::new(std::io::BufReader::new(std::io::stdin())),
    };

    let bus = CommandBus::new();
    let client = bus.client();
    let script = thread::Builder::new()
        .name("mural-script".into())
        .spawn(move || run_script(input, client))
        .context("spawning the script thread")?;

    let mut last = Instant::now();
    while gui.is_running() && !script.is_finished() {
        bus.pump(&mut gui);
        let now = Instant::now();
        gui.update(now - last, Position::default());
        last = now;
        thread::sleep(frame);
    }
    bus.pump(&mut gui);
    log::info!("exiting");

    gui.config().save(&cli.config)?;
    Ok(())
}
