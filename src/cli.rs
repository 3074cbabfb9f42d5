use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{config::Config, errors::constants::DEFAULT_CONFIG_PATH, speech::encoding::RequestEncoding};

/// Send text to a speech synthesis backend and play the returned audio
#[derive(Parser, Debug)]
#[command(name = "speak-client")]
#[command(version)]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Text to speak. Reads stdin line by line when omitted.
    /// Put `--` first to speak text that is also a subcommand name, e.g. `-- voices`.
    pub text: Option<String>,

    /// Config file; SPEAK_* environment variables are used when it does not exist
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Synthesis endpoint URL
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Send the text as a JSON body instead of a form field
    #[arg(long, global = true)]
    pub json: bool,

    /// Start playback as soon as the source is set
    #[arg(short, long, global = true)]
    pub autoplay: bool,

    /// External player command, e.g. "mpv --no-video"
    #[arg(short, long, global = true)]
    pub player: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List available voices
    Voices,
}

impl Cli {
    /// Apply command line overrides on top of a loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.json {
            config.encoding = RequestEncoding::Json;
        }
        if self.autoplay {
            config.autoplay = true;
        }
        if let Some(player) = &self.player {
            config.player = Some(player.clone());
        }
        config
    }
}
