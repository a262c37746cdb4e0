//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a round can be replayed
//! or rebalanced from a JSON file without touching the code.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Velocity added per tick
    pub gravity: f32,
    /// Velocity a jump sets (overwrites, does not accumulate)
    pub jump_impulse: f32,
    /// Gate scroll per tick
    pub scroll_speed: f32,

    // === Gates ===
    pub gate_width: f32,
    pub gate_gap: f32,
    pub min_top_height: u32,
    pub top_height_range: u32,
    pub spawn_trigger_margin: f32,

    // === Playfield ===
    pub ground_height: f32,

    // === Avatar ===
    pub avatar_start: Vec2,
    pub avatar_size: Vec2,

    // === Timing (wall clock) ===
    pub countdown_start: u32,
    pub countdown_interval_ms: f64,
    pub die_cue_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            scroll_speed: SCROLL_SPEED,

            gate_width: GATE_WIDTH,
            gate_gap: GATE_GAP,
            min_top_height: MIN_TOP_HEIGHT,
            top_height_range: TOP_HEIGHT_RANGE,
            spawn_trigger_margin: SPAWN_TRIGGER_MARGIN,

            ground_height: GROUND_HEIGHT,

            avatar_start: Vec2::new(AVATAR_START_X, AVATAR_START_Y),
            avatar_size: Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT),

            countdown_start: COUNTDOWN_START,
            countdown_interval_ms: COUNTDOWN_INTERVAL_MS,
            die_cue_delay_ms: DIE_CUE_DELAY_MS,
        }
    }
}

/// Upper bound for the top barrier's base height and its random range, in pixels
const MAX_BARRIER_EXTENT: u32 = 4096;

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values the simulation cannot work with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        if !self.jump_impulse.is_finite() {
            self.jump_impulse = defaults.jump_impulse;
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed <= 0.0 {
            self.scroll_speed = defaults.scroll_speed;
        }
        if !self.gate_width.is_finite() || self.gate_width <= 0.0 {
            self.gate_width = defaults.gate_width;
        }
        if !self.gate_gap.is_finite() || self.gate_gap <= 0.0 {
            self.gate_gap = defaults.gate_gap;
        }
        self.min_top_height = self.min_top_height.min(MAX_BARRIER_EXTENT);
        self.top_height_range = self.top_height_range.clamp(1, MAX_BARRIER_EXTENT);
        if !self.spawn_trigger_margin.is_finite() || self.spawn_trigger_margin < 0.0 {
            self.spawn_trigger_margin = defaults.spawn_trigger_margin;
        }
        if !self.ground_height.is_finite() || self.ground_height < 0.0 {
            self.ground_height = defaults.ground_height;
        }
        if !self.avatar_start.is_finite() {
            self.avatar_start = defaults.avatar_start;
        }
        if !self.avatar_size.is_finite() || self.avatar_size.min_element() <= 0.0 {
            self.avatar_size = defaults.avatar_size;
        }
        if !self.countdown_interval_ms.is_finite() || self.countdown_interval_ms <= 0.0 {
            self.countdown_interval_ms = defaults.countdown_interval_ms;
        }
        if !self.die_cue_delay_ms.is_finite() || self.die_cue_delay_ms < 0.0 {
            self.die_cue_delay_ms = defaults.die_cue_delay_ms;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.jump_impulse, -8.0);
        assert_eq!(tuning.gate_gap, 160.0);
        assert_eq!(tuning.countdown_start, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "countdown_start": 5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.countdown_start, 5);
        assert_eq!(tuning.gate_width, GATE_WIDTH);
    }

    #[test]
    fn test_sanitized_rejects_nonsense() {
        let tuning = Tuning {
            scroll_speed: -1.0,
            gate_gap: 0.0,
            top_height_range: 0,
            countdown_interval_ms: f64::NAN,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.scroll_speed, SCROLL_SPEED);
        assert_eq!(tuning.gate_gap, GATE_GAP);
        assert_eq!(tuning.top_height_range, 1);
        assert_eq!(tuning.countdown_interval_ms, COUNTDOWN_INTERVAL_MS);
    }

    #[test]
    fn test_extreme_top_heights_are_bounded() {
        let tuning =
            Tuning::from_json(r#"{ "min_top_height": 4294967295, "top_height_range": 4294967295 }"#)
                .unwrap();
        assert_eq!(tuning.min_top_height, MAX_BARRIER_EXTENT);
        assert_eq!(tuning.top_height_range, MAX_BARRIER_EXTENT);
        assert!(tuning.min_top_height.checked_add(tuning.top_height_range).is_some());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }
}
