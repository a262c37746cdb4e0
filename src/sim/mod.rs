//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no frame-time scaling
//! - Seeded RNG only
//! - Wall-clock time only enters through explicit `now_ms` arguments
//! - No rendering, audio or platform calls; collaborators only see events and snapshots

pub mod autopilot;
pub mod collision;
pub mod gates;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{Evaluation, evaluate};
pub use gates::{Gates, Obstacle};
pub use schedule::{Scheduler, TaskId, TaskKind};
pub use state::{Avatar, Collision, GameEvent, GamePhase, GameSession, Playfield};
pub use tick::{countdown_tick, jump, restart, tick};
