use std::{
    process::{Command, Stdio},
    sync::{
        atomic::{AtomicU64, Ordering},
        RwLock,
    },
};

use tracing::{debug, info, warn};

use crate::errors::PlaybackWarning;

/// The capability that renders an audio URL as sound.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackSink: Send + Sync {
    /// Replace the current source.
    fn set_source(&self, url: &str);

    /// Start playing the current source. Failures are reported, never fatal.
    fn play(&self) -> Result<(), PlaybackWarning>;
}

/// Sink that only remembers what it was told.
#[derive(Debug, Default)]
pub struct MemorySink {
    source: RwLock<Option<String>>,
    plays: AtomicU64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<String> {
        self.source
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn play_count(&self) -> u64 {
        self.plays.load(Ordering::Relaxed)
    }
}

impl PlaybackSink for MemorySink {
    fn set_source(&self, url: &str) {
        let mut source = self
            .source
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *source = Some(url.to_string());
    }

    fn play(&self) -> Result<(), PlaybackWarning> {
        if self.source().is_none() {
            return Err(PlaybackWarning::new("no source set"));
        }
        self.plays.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Sink that hands the source to an external player such as `mpv` or `ffplay`.
#[derive(Debug)]
pub struct CommandSink {
    player: Option<String>,
    source: MemorySink,
}

impl CommandSink {
    pub fn new(player: Option<String>) -> Self {
        Self {
            player: player.filter(|p| !p.trim().is_empty()),
            source: MemorySink::new(),
        }
    }

    pub fn source(&self) -> Option<String> {
        self.source.source()
    }
}

impl PlaybackSink for CommandSink {
    fn set_source(&self, url: &str) {
        info!(url = url, "Playback source updated");
        self.source.set_source(url);
    }

    fn play(&self) -> Result<(), PlaybackWarning> {
        let player = self
            .player
            .as_deref()
            .ok_or_else(|| PlaybackWarning::new("no player command configured"))?;
        let url = self
            .source()
            .ok_or_else(|| PlaybackWarning::new("no source set"))?;

        let mut parts = player.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| PlaybackWarning::new("no player command configured"))?;

        let mut child = Command::new(program)
            .args(parts)
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlaybackWarning::new(format!("failed to start {}: {}", program, e)))?;

        debug!(pid = child.id(), player = program, "Player started");
        // Reap the player without blocking the caller.
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                warn!(error = %e, "Failed to wait for player");
            }
        });
        self.source.plays.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_source() {
        let sink = MemorySink::new();
        assert_eq!(sink.source(), None);

        sink.set_source("https://x/a.mp3");
        sink.set_source("https://x/b.mp3");
        assert_eq!(sink.source().as_deref(), Some("https://x/b.mp3"));
    }

    #[test]
    fn test_memory_sink_play_requires_source() {
        let sink = MemorySink::new();
        assert!(sink.play().is_err());
        assert_eq!(sink.play_count(), 0);

        sink.set_source("https://x/a.mp3");
        assert!(sink.play().is_ok());
        assert_eq!(sink.play_count(), 1);
    }

    #[test]
    fn test_command_sink_without_player_warns() {
        let sink = CommandSink::new(None);
        sink.set_source("https://x/a.mp3");
        let warning = sink.play().unwrap_err();
        assert_eq!(warning.reason, "no player command configured");

        let blank = CommandSink::new(Some("   ".to_string()));
        blank.set_source("https://x/a.mp3");
        assert!(blank.play().is_err());
    }

    #[test]
    fn test_command_sink_spawn_failure_warns() {
        let sink = CommandSink::new(Some("definitely-not-a-real-player-binary".to_string()));
        sink.set_source("https://x/a.mp3");
        let warning = sink.play().unwrap_err();
        assert!(warning
            .reason
            .starts_with("failed to start definitely-not-a-real-player-binary"));
    }

    #[test]
    fn test_command_sink_without_source_warns() {
        let sink = CommandSink::new(Some("mpv".to_string()));
        assert_eq!(sink.play().unwrap_err().reason, "no source set");
    }
}
