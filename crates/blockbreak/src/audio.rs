//! Sound output

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use blockbreak_core::platform::{SoundCue, SoundPlayer};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};

/// File in the assets directory holding the clip for `cue`
pub fn cue_file(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Crunch => "crunch.wav",
        SoundCue::Place => "place.wav",
    }
}

/// Encoded cue clips, decoded again for every playback
pub struct CueClips {
    crunch: Arc<[u8]>,
    place: Arc<[u8]>,
}

impl CueClips {
    /// Read both clips from `dir` and check that they decode
    pub fn load(dir: &Path) -> Result<Self> {
        let clips = Self {
            crunch: read_clip(dir, SoundCue::Crunch)?,
            place: read_clip(dir, SoundCue::Place)?,
        };
        for cue in [SoundCue::Crunch, SoundCue::Place] {
            clips
                .source(cue)
                .with_context(|| format!("Failed to decode {}", cue_file(cue)))?;
        }
        Ok(clips)
    }

    pub fn source(&self, cue: SoundCue) -> Result<Decoder<Cursor<Arc<[u8]>>>> {
        let bytes = match cue {
            SoundCue::Crunch => self.crunch.clone(),
            SoundCue::Place => self.place.clone(),
        };
        Ok(Decoder::new(Cursor::new(bytes))?)
    }
}

fn read_clip(dir: &Path, cue: SoundCue) -> Result<Arc<[u8]>> {
    let path = dir.join(cue_file(cue));
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read sound {}", path.display()))?;
    Ok(bytes.into())
}

/// Plays cue clips on the default output device
pub struct DeviceSoundPlayer {
    // Dropping the stream stops playback
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: CueClips,
}

impl DeviceSoundPlayer {
    pub fn open(clips: CueClips) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;
        Ok(Self {
            _stream: stream,
            handle,
            clips,
        })
    }
}

impl SoundPlayer for DeviceSoundPlayer {
    fn play(&mut self, cue: SoundCue) {
        let result = self
            .clips
            .source(cue)
            .and_then(|source| Ok(self.handle.play_raw(source.convert_samples())?));
        match result {
            Ok(()) => log::debug!("Sound cue {:?}", cue),
            Err(e) => log::warn!("Failed to play {}: {:#}", cue_file(cue), e),
        }
    }
}

/// Sound player that reports cues to the log instead of an audio device
#[derive(Debug, Default)]
pub struct LogSoundPlayer {
    played: u64,
}

impl LogSoundPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl SoundPlayer for LogSoundPlayer {
    fn play(&mut self, cue: SoundCue) {
        self.played += 1;
        log::debug!("Sound cue {:?} ({}, muted)", cue, cue_file(cue));
    }
}

/// Device playback of the clips in `assets_dir`, or the logging player when
/// the clips or the output device are unavailable
pub fn open_sound_player(assets_dir: &Path) -> Box<dyn SoundPlayer> {
    match CueClips::load(assets_dir).and_then(DeviceSoundPlayer::open) {
        Ok(player) => {
            log::info!("Audio output ready");
            Box::new(player)
        }
        Err(e) => {
            log::warn!("Sound disabled: {:#}", e);
            Box::new(LogSoundPlayer::new())
        }
    }
}
