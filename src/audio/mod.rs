//! Optional sound cues
//!
//! Playback is best effort: a cue that cannot be played is logged and the
//! game carries on.

use anyhow::{Context, Result};
use log::warn;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    GameOver,
}

pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Rings the terminal bell; twice for game over
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SoundPlayer for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        let bell: &[u8] = match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::GameOver => b"\x07\x07",
        };
        self.out.write_all(bell).context("Failed to ring bell")?;
        self.out.flush().context("Failed to flush bell")?;
        Ok(())
    }
}

/// Plays nothing
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _cue: SoundCue) -> Result<()> {
        Ok(())
    }
}

/// Play a cue, logging rather than returning any failure
pub fn play_best_effort(player: &mut dyn SoundPlayer, cue: SoundCue) {
    if let Err(e) = player.play(cue) {
        warn!("Could not play {:?} sound: {:#}", cue, e);
    }
}
