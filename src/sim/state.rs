//! Game state and core simulation types
//!
//! Everything one round needs lives in [`GameSession`], owned by whoever
//! drives the frames. There is no global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gates::{Gates, Obstacle};
use crate::consts::{MIN_PLAYFIELD_HEIGHT, MIN_PLAYFIELD_WIDTH};
use crate::renderer::FrameSnapshot;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-start countdown, decremented by a wall-clock timer
    Idle { countdown: u32 },
    /// Active gameplay
    Running,
    /// Collision happened; waits for an explicit restart
    Over,
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Over)
    }

    /// Remaining countdown while idle
    pub fn countdown(&self) -> Option<u32> {
        match self {
            GamePhase::Idle { countdown } => Some(*countdown),
            _ => None,
        }
    }
}

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Ground,
    Gate { id: u32 },
}

/// Things the simulation reports to the outside world.
///
/// The driver turns these into audio cues and logs; the simulation itself
/// never calls a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    CountdownTick { remaining: u32 },
    Started,
    Jumped,
    Scored { score: u32 },
    Crashed { cause: Collision },
    Restarted,
}

/// Playfield dimensions in pixels, fixed for a round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Clamp to the smallest playable size (viewports can report 0 or NaN)
    pub fn new(width: f32, height: f32) -> Self {
        let clamp = |v: f32, min: f32| if v.is_finite() { v.max(min) } else { min };
        Self {
            width: clamp(width, MIN_PLAYFIELD_WIDTH),
            height: clamp(height, MIN_PLAYFIELD_HEIGHT),
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(480.0, 640.0)
    }
}

/// The player-controlled avatar. `pos` is the top-left corner; x never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub velocity: f32,
    pub size: Vec2,
}

impl Avatar {
    pub fn new(start: Vec2, size: Vec2) -> Self {
        Self {
            pos: start,
            velocity: 0.0,
            size,
        }
    }

    /// One tick of constant gravity: velocity first, then position
    pub fn integrate(&mut self, gravity: f32) {
        self.velocity += gravity;
        self.pos.y += self.velocity;
    }

    /// Jump: overwrite the velocity
    pub fn apply_impulse(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed for gate heights
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub gates: Gates,
    pub score: u32,
    /// Simulation ticks in the current round
    pub time_ticks: u64,
    /// Rounds started in this session (1-based)
    pub round: u32,
}

impl GameSession {
    /// Create a session in the countdown phase
    pub fn new(tuning: Tuning, playfield: Playfield, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let mut session = Self {
            seed,
            avatar: Avatar::new(tuning.avatar_start, tuning.avatar_size),
            gates: Gates::new(&tuning, seed),
            tuning,
            playfield,
            phase: GamePhase::Over,
            score: 0,
            time_ticks: 0,
            round: 0,
        };
        session.reset_round(playfield);
        log::info!(
            "Session created (seed {}, playfield {}x{})",
            seed,
            session.playfield.width,
            session.playfield.height
        );
        session
    }

    /// Reinitialize every entity and re-enter the countdown
    pub(crate) fn reset_round(&mut self, playfield: Playfield) {
        self.playfield = playfield;
        self.avatar = Avatar::new(self.tuning.avatar_start, self.tuning.avatar_size);
        // The gate RNG keeps running so every round gets fresh heights
        self.gates.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.round += 1;
        self.phase = match self.tuning.countdown_start {
            0 => GamePhase::Running,
            countdown => GamePhase::Idle { countdown },
        };
    }

    /// Top edge of the ground band
    pub fn ground_top(&self) -> f32 {
        self.playfield.height - self.tuning.ground_height
    }

    /// Read-only view for the render adapter
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            avatar: &self.avatar,
            gates: self.gates.as_slice(),
            score: self.score,
            phase: self.phase,
            playfield: self.playfield,
            ground_top: self.ground_top(),
        }
    }

    /// Gates in left-to-right order
    pub fn obstacles(&self) -> &[Obstacle] {
        self.gates.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_countdown() {
        assert_eq!(GamePhase::Idle { countdown: 2 }.countdown(), Some(2));
        assert_eq!(GamePhase::Running.countdown(), None);
        assert_eq!(GamePhase::Over.countdown(), None);
    }

    #[test]
    fn test_new_session_counts_down() {
        let session = GameSession::new(Tuning::default(), Playfield::default(), 1);
        assert_eq!(session.phase, GamePhase::Idle { countdown: 3 });
        assert_eq!(session.score, 0);
        assert_eq!(session.round, 1);
        assert!(session.obstacles().is_empty());
        assert_eq!(session.avatar.pos, Vec2::new(100.0, 200.0));
        assert_eq!(session.avatar.velocity, 0.0);
    }

    #[test]
    fn test_zero_countdown_starts_running() {
        let tuning = Tuning {
            countdown_start: 0,
            ..Default::default()
        };
        let session = GameSession::new(tuning, Playfield::default(), 1);
        assert_eq!(session.phase, GamePhase::Running);
    }

    #[test]
    fn test_playfield_clamps_degenerate_sizes() {
        let pf = Playfield::new(0.0, -50.0);
        assert_eq!(pf.width, MIN_PLAYFIELD_WIDTH);
        assert_eq!(pf.height, MIN_PLAYFIELD_HEIGHT);

        let pf = Playfield::new(f32::NAN, f32::INFINITY);
        assert_eq!(pf.width, MIN_PLAYFIELD_WIDTH);
        assert_eq!(pf.height, MIN_PLAYFIELD_HEIGHT);

        let pf = Playfield::new(1920.0, 1080.0);
        assert_eq!(pf, Playfield { width: 1920.0, height: 1080.0 });
    }

    #[test]
    fn test_integrate_applies_velocity_then_position() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 200.0), Vec2::new(50.0, 40.0));
        avatar.integrate(0.5);
        assert_eq!(avatar.velocity, 0.5);
        assert_eq!(avatar.pos.y, 200.5);
        avatar.integrate(0.5);
        assert_eq!(avatar.velocity, 1.0);
        assert_eq!(avatar.pos.y, 201.5);
        assert_eq!(avatar.pos.x, 100.0);
    }

    #[test]
    fn test_impulse_overwrites_velocity() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 200.0), Vec2::new(50.0, 40.0));
        avatar.velocity = 12.0;
        avatar.apply_impulse(-8.0);
        assert_eq!(avatar.velocity, -8.0);
        avatar.apply_impulse(-8.0);
        assert_eq!(avatar.velocity, -8.0);
    }

    #[test]
    fn test_avatar_may_leave_the_top() {
        let mut avatar = Avatar::new(Vec2::new(100.0, 5.0), Vec2::new(50.0, 40.0));
        avatar.apply_impulse(-8.0);
        avatar.integrate(0.5);
        assert!(avatar.top() < 0.0);
    }
}
