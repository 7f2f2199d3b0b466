//! Audio cues using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! The simulation never waits on audio: events are mapped to cues after the
//! fact, and playback failures are logged and dropped.

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase};

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Trash collected, upgrade bought
    Success,
    /// Obstacle or hazard hit, game over
    Hit,
}

/// Background music directives keyed to phase changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// Start from the beginning
    Play,
    Pause,
    Resume,
    /// Stop and rewind
    Stop,
}

/// Sound effect for a simulation event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::TrashCollected { .. } | GameEvent::UpgradePurchased { .. } => {
            Some(SoundEffect::Success)
        }
        GameEvent::ObstacleHit | GameEvent::HazardHit { .. } => Some(SoundEffect::Hit),
        GameEvent::PhaseChanged {
            to: GamePhase::GameOver,
            ..
        } => Some(SoundEffect::Hit),
        _ => None,
    }
}

/// Music directive for a phase change, if any
pub fn music_for(from: GamePhase, to: GamePhase) -> Option<MusicCue> {
    match (from, to) {
        (GamePhase::UpgradeMenu, GamePhase::Playing) => Some(MusicCue::Resume),
        (_, GamePhase::Playing) => Some(MusicCue::Play),
        (GamePhase::Playing, GamePhase::UpgradeMenu) => Some(MusicCue::Pause),
        (_, GamePhase::GameOver) => Some(MusicCue::Stop),
        _ => None,
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    #[cfg(target_arch = "wasm32")]
    music: Option<(OscillatorNode, GainNode)>,
    settings: Settings,
    music_playing: bool,
}

/// Background drone sits well under the effects
const MUSIC_GAIN: f32 = 0.2;

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut settings = settings.clone();
        settings.clamp_volumes();
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: Self::create_context(),
            #[cfg(target_arch = "wasm32")]
            music: None,
            settings,
            music_playing: false,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn create_context() -> Option<AudioContext> {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        ctx
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.apply_music_gain();
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Effective sound effect volume
    fn effective_volume(&self) -> f32 {
        self.settings.effective_sfx_volume()
    }

    /// Drone gain: silent unless music is playing
    fn effective_music_volume(&self) -> f32 {
        if self.music_playing {
            self.settings.effective_music_volume() * MUSIC_GAIN
        } else {
            0.0
        }
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        if let Some(effect) = sound_for(event) {
            self.play(effect);
        }
        if let GameEvent::PhaseChanged { from, to } = *event {
            if let Some(cue) = music_for(from, to) {
                self.music(cue);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let played = match effect {
                SoundEffect::Success => self.play_success(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
            };
            if played.is_none() {
                log::warn!("Failed to play {:?}", effect);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        log::debug!("Sound {:?} at volume {:.2}", effect, vol);
    }

    /// Apply a background music directive
    pub fn music(&mut self, cue: MusicCue) {
        self.music_playing = matches!(cue, MusicCue::Play | MusicCue::Resume);
        log::debug!("Music {:?}", cue);

        #[cfg(target_arch = "wasm32")]
        if self.music.is_none() && self.music_playing {
            self.music = self.start_music_drone();
            if self.music.is_none() {
                log::warn!("Failed to start background music");
            }
        }

        self.apply_music_gain();
    }

    #[cfg(target_arch = "wasm32")]
    fn apply_music_gain(&self) {
        let vol = self.effective_music_volume();
        if let (Some(ctx), Some((_, gain))) = (&self.ctx, &self.music) {
            let t = ctx.current_time();
            gain.gain().set_target_at_time(vol, t, 0.1).ok();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_music_gain(&self) {
        log::trace!("Music volume {:.2}", self.effective_music_volume());
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Success - rising three-note chime
    #[cfg(target_arch = "wasm32")]
    fn play_success(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [660.0, 880.0, 1100.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            let (osc, gain) = self.create_osc(ctx, *freq, OscillatorType::Sine)?;
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.25, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok()?;
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.2).ok()?;
        }
        Some(())
    }

    /// Hit - dull thump with a low buzz
    #[cfg(target_arch = "wasm32")]
    fn play_hit(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let t = ctx.current_time();

        let (osc, gain) = self.create_osc(ctx, 160.0, OscillatorType::Sine)?;
        gain.gain().set_value_at_time(vol * 0.6, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok()?;
        osc.frequency().set_value_at_time(160.0, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.2)
            .ok()?;
        osc.start().ok()?;
        osc.stop_with_when(t + 0.25).ok()?;

        let (buzz, buzz_gain) = self.create_osc(ctx, 90.0, OscillatorType::Sawtooth)?;
        buzz_gain.gain().set_value_at_time(vol * 0.2, t).ok()?;
        buzz_gain
            .gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok()?;
        buzz.start().ok()?;
        buzz.stop_with_when(t + 0.2).ok()?;
        Some(())
    }

    /// Soft looping drone used as background music
    #[cfg(target_arch = "wasm32")]
    fn start_music_drone(&self) -> Option<(OscillatorNode, GainNode)> {
        let ctx = self.ctx.as_ref()?;
        let (osc, gain) = self.create_osc(ctx, 110.0, OscillatorType::Triangle)?;
        gain.gain().set_value(0.0);
        osc.start().ok()?;
        Some((osc, gain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HazardKind, TrashType, UpgradeType};

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            sound_for(&GameEvent::TrashCollected {
                kind: TrashType::Metal,
                points: 20
            }),
            Some(SoundEffect::Success)
        );
        assert_eq!(
            sound_for(&GameEvent::UpgradePurchased {
                kind: UpgradeType::Tree
            }),
            Some(SoundEffect::Success)
        );
        assert_eq!(sound_for(&GameEvent::ObstacleHit), Some(SoundEffect::Hit));
        assert_eq!(
            sound_for(&GameEvent::HazardHit {
                kind: HazardKind::Smoke
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(sound_for(&GameEvent::FactHidden), None);
    }

    #[test]
    fn test_music_follows_phases() {
        use GamePhase::*;
        assert_eq!(music_for(Tutorial, Playing), Some(MusicCue::Play));
        assert_eq!(music_for(StartMenu, Playing), Some(MusicCue::Play));
        assert_eq!(music_for(Playing, UpgradeMenu), Some(MusicCue::Pause));
        assert_eq!(music_for(UpgradeMenu, Playing), Some(MusicCue::Resume));
        assert_eq!(music_for(Playing, GameOver), Some(MusicCue::Stop));
        assert_eq!(music_for(GameOver, StartMenu), None);
    }

    #[test]
    fn test_manager_tracks_music_state() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.handle(&GameEvent::PhaseChanged {
            from: GamePhase::Tutorial,
            to: GamePhase::Playing,
        });
        assert!(audio.music_playing());
        audio.handle(&GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::GameOver,
        });
        assert!(!audio.music_playing());
    }

    #[test]
    fn test_volumes_follow_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 2.0,
            music_volume: 0.4,
            ..Default::default()
        };
        let mut audio = AudioManager::new(&settings);
        assert!((audio.effective_volume() - 0.5).abs() < 1e-6);
        assert_eq!(audio.effective_music_volume(), 0.0);

        audio.music(MusicCue::Play);
        assert!((audio.effective_music_volume() - 0.5 * 0.4 * MUSIC_GAIN).abs() < 1e-6);
        audio.music(MusicCue::Pause);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut audio = AudioManager::new(&Settings::default());
        audio.music(MusicCue::Play);
        audio.set_muted(true);
        assert!(audio.is_muted());
        assert_eq!(audio.effective_volume(), 0.0);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }
}
