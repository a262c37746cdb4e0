//! Flappy Gates - A single-screen gate-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, gates, collisions, game state)
//! - `driver`: Per-frame clock driver wiring the simulation to its collaborators
//! - `renderer`: Render adapter contract and WebGPU implementation
//! - `audio`: Audio cue sink contract and Web Audio implementation
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioCueSink, Cue, NullAudio};
pub use driver::Driver;
pub use renderer::{FrameSnapshot, HeadlessRenderer, RenderAdapter};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration of the display refresh (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Downward acceleration added to the avatar velocity every tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -8.0;
    /// Horizontal gate scroll per tick
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Gate geometry
    pub const GATE_WIDTH: f32 = 80.0;
    pub const GATE_GAP: f32 = 160.0;
    /// Top barrier height is drawn from [MIN_TOP_HEIGHT, MIN_TOP_HEIGHT + TOP_HEIGHT_RANGE)
    pub const MIN_TOP_HEIGHT: u32 = 100;
    pub const TOP_HEIGHT_RANGE: u32 = 200;
    /// Spawn a new gate once the newest one is this far left of the right edge
    pub const SPAWN_TRIGGER_MARGIN: f32 = 200.0;

    /// Ground band at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Avatar defaults
    pub const AVATAR_START_X: f32 = 100.0;
    pub const AVATAR_START_Y: f32 = 200.0;
    pub const AVATAR_WIDTH: f32 = 50.0;
    pub const AVATAR_HEIGHT: f32 = 40.0;

    /// Pre-start countdown
    pub const COUNTDOWN_START: u32 = 3;
    pub const COUNTDOWN_INTERVAL_MS: f64 = 1000.0;
    /// Delay between the Hit and Die cues
    pub const DIE_CUE_DELAY_MS: f64 = 300.0;

    /// Smallest playfield we agree to simulate
    pub const MIN_PLAYFIELD_WIDTH: f32 = 320.0;
    pub const MIN_PLAYFIELD_HEIGHT: f32 = 360.0;
}
