use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use speak_client::{
    cli::{Cli, Commands},
    config::Config,
    speech::{http::HttpBackend, sink::CommandSink},
    trace::init_tracing_subscriber,
    SpeakRequestHandler,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Speak one piece of text and report the result to the user.
///
/// Returns whether the interaction succeeded.
async fn speak_once(handler: &SpeakRequestHandler, text: &str) -> bool {
    match handler.speak(text).await {
        Ok(outcome) => {
            if let Some(message) = &outcome.message {
                eprintln!("{}", message);
            }
            if let Some(warning) = &outcome.playback_warning {
                eprintln!("{}", warning);
            }
            println!("{}", outcome.audio_url);
            true
        }
        Err(err) => {
            eprintln!("{}", err.notification());
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load config
    let config = cli.apply(Config::load(&cli.config)?);

    let _guard = init_tracing_subscriber(&config.log_level, &config.otel_http_url)?;

    let backend = Arc::new(HttpBackend::from_config(&config)?);
    info!(
        endpoint = %backend.endpoint(),
        encoding = %backend.encoding(),
        "Synthesis backend configured"
    );

    if cli.command == Some(Commands::Voices) {
        return match backend.list_voices().await {
            Ok(voices) => {
                for voice in voices {
                    println!(
                        "{}\t{}\t{}",
                        voice.voice_id,
                        voice.label(),
                        voice.locale.as_deref().unwrap_or("-")
                    );
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{}", err.notification());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let sink = Arc::new(CommandSink::new(config.player.clone()));
    let handler = SpeakRequestHandler::new(backend, sink).with_autoplay(config.autoplay);

    let code = match &cli.text {
        Some(text) => {
            if speak_once(&handler, text).await {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                speak_once(&handler, &line).await;
            }
            ExitCode::SUCCESS
        }
    };

    let stats = handler.metrics().get_stats();
    info!(
        requests = stats.requests,
        successes = stats.successes,
        success_rate = stats.success_rate(),
        playback_warnings = stats.playback_warnings,
        "Session finished"
    );

    Ok(code)
}
