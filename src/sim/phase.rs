//! Phase state machine
//!
//! StartMenu -> Tutorial -> Playing <-> UpgradeMenu, Playing -> GameOver -> StartMenu.
//! Anything else is rejected and leaves the state untouched.

use thiserror::Error;

use super::state::{GameEvent, GamePhase, GameState};

/// A transition requested from a phase that does not allow it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhaseError {
    #[error("cannot {action} while in {}", .phase.as_str())]
    InvalidTransition {
        action: &'static str,
        phase: GamePhase,
    },
}

impl GameState {
    fn require(&self, action: &'static str, allowed: &[GamePhase]) -> Result<(), PhaseError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            log::debug!("Ignoring {} in phase {}", action, self.phase.as_str());
            Err(PhaseError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {} -> {}", from.as_str(), to.as_str());
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    /// Begin a fresh Playing session
    fn begin_session(&mut self) {
        self.reset_session();
        log::info!("New session (seed {})", self.seed);
        self.set_phase(GamePhase::Playing);
    }

    /// Leave the start menu: first run goes through the tutorial
    pub fn start_game(&mut self) -> Result<(), PhaseError> {
        self.require("start the game", &[GamePhase::StartMenu])?;
        if self.tutorial_complete {
            self.begin_session();
        } else {
            self.set_phase(GamePhase::Tutorial);
        }
        Ok(())
    }

    /// Open the tutorial from the start menu
    pub fn start_tutorial(&mut self) -> Result<(), PhaseError> {
        self.require("start the tutorial", &[GamePhase::StartMenu])?;
        self.set_phase(GamePhase::Tutorial);
        Ok(())
    }

    /// Finish the tutorial and start playing
    pub fn end_tutorial(&mut self) -> Result<(), PhaseError> {
        self.require("end the tutorial", &[GamePhase::Tutorial])?;
        self.tutorial_complete = true;
        self.begin_session();
        Ok(())
    }

    /// Pause into the upgrade shop
    pub fn show_upgrade_menu(&mut self) -> Result<(), PhaseError> {
        self.require("open the upgrade menu", &[GamePhase::Playing])?;
        self.set_phase(GamePhase::UpgradeMenu);
        Ok(())
    }

    /// Resume from the upgrade shop without resetting anything
    pub fn hide_upgrade_menu(&mut self) -> Result<(), PhaseError> {
        self.require("close the upgrade menu", &[GamePhase::UpgradeMenu])?;
        self.set_phase(GamePhase::Playing);
        Ok(())
    }

    /// Back to the start menu. Session fields are reset on the next start,
    /// so the final score stays readable until then.
    pub fn restart_game(&mut self) -> Result<(), PhaseError> {
        self.require("restart", &[GamePhase::GameOver])?;
        self.resolved.clear();
        self.set_phase(GamePhase::StartMenu);
        Ok(())
    }

    /// Meter ran dry: freeze the session
    pub(crate) fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!(
            "Game over: score {}, distance {:.1}",
            self.score,
            self.distance
        );
        self.set_phase(GamePhase::GameOver);
    }
}
