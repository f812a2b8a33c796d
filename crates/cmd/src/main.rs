// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use nextplayer::{
    ControlsView, Player, PlayerCallbacks, PlayerConfig, PlayerState, RecordingMedia, Script,
    media::MediaCommand,
};
use nextplayer_common_telemetry::{LogFormat, LoggingOptions};
use serde::Serialize;
use snafu::{ResultExt, Whatever};
use tracing::info;

/// Package author information from Cargo.toml
const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

#[derive(Debug, Parser)]
#[clap(
name = "nextplayer",
about = "Check player configs and replay scripted player sessions",
author = AUTHOR,
version)]
struct Cli {
    /// Log filter, e.g. "info" or "warn,nextplayer=debug".
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Text)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Check(CheckArgs),
    Replay(ReplayArgs),
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Decode and validate a player config, then print the normalized config
and the controls view a freshly mounted player would render.
Examples:

nextplayer check player.json

")]
struct CheckArgs {
    /// Path to a JSON player config.
    config: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    config: PlayerConfig,
    view:   ControlsView,
}

impl CheckArgs {
    fn run(&self) -> Result<(), Whatever> {
        let config = load_config(&self.config)?;
        let view = ControlsView::new(&PlayerState::new(config.muted), &config);
        print_json(&CheckReport { config, view })
    }
}

#[derive(Debug, Clone, Args)]
#[command(flatten_help = true)]
#[command(long_about = r"

Mount a player over an in-memory media element, feed it a timed input
script and print the final state, view and every media command issued.
Examples:

nextplayer replay --config player.json --script session.json

")]
struct ReplayArgs {
    #[arg(long)]
    config: PathBuf,

    #[arg(long)]
    script: PathBuf,

    /// Refuse play requests the way a browser blocks autoplay.
    #[arg(long)]
    reject_play: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayReport {
    state:    PlayerState,
    view:     ControlsView,
    commands: Vec<MediaCommand>,
}

impl ReplayArgs {
    fn run(&self) -> Result<(), Whatever> {
        let config = load_config(&self.config)?;
        let raw = read(&self.script)?;
        let script = Script::from_json(&raw)
            .with_whatever_context(|_| format!("invalid script {}", self.script.display()))?;

        let mut media = RecordingMedia::new();
        if self.reject_play {
            media = media.rejecting_play("play request refused by replay host");
        }
        let mut player = Player::mount(config, media.clone(), PlayerCallbacks::new())
            .whatever_context("failed to mount player")?;
        let responses = script.replay(&mut player, Instant::now());
        info!(steps = responses.len(), "replay finished");

        player.unmount();
        print_json(&ReplayReport {
            state:    player.state().clone(),
            view:     player.view(),
            commands: media.commands(),
        })
    }
}

fn read(path: &Path) -> Result<String, Whatever> {
    std::fs::read_to_string(path).with_whatever_context(|_| format!("failed to read {}", path.display()))
}

fn load_config(path: &Path) -> Result<PlayerConfig, Whatever> {
    let raw = read(path)?;
    PlayerConfig::from_json(&raw)
        .with_whatever_context(|_| format!("invalid player config {}", path.display()))
}

#[allow(clippy::print_stdout)]
fn print_json(value: &impl Serialize) -> Result<(), Whatever> {
    let out = serde_json::to_string_pretty(value).whatever_context("failed to encode report")?;
    println!("{out}");
    Ok(())
}

fn main() -> Result<(), Whatever> {
    let cli = Cli::parse();

    let opts = LoggingOptions::builder()
        .maybe_level(cli.log_level.clone())
        .log_format(cli.log_format.into())
        .console_stderr(true)
        .build();
    let _guards = nextplayer_common_telemetry::init_global_logging("nextplayer", &opts);
    nextplayer_common_telemetry::set_panic_hook();

    match cli.commands {
        Commands::Check(args) => args.run(),
        Commands::Replay(args) => args.run(),
    }
}
