//! Gate obstacles: spawning, scrolling and recycling
//!
//! Gates are kept in creation order, which is also their left-to-right order
//! on screen. Spacing comes from position (a new gate appears once the newest
//! one has scrolled far enough), never from elapsed time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A paired top/bottom barrier with a fixed gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge; decreases every tick
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the upper barrier
    pub top_height: f32,
    /// Top edge of the lower barrier (`top_height + gap`)
    pub bottom_y: f32,
    /// Already counted towards the score
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, top_height: f32, gap: f32) -> Self {
        Self {
            id,
            x,
            width,
            top_height,
            bottom_y: top_height + gap,
            passed: false,
        }
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical opening
    #[inline]
    pub fn gap(&self) -> f32 {
        self.bottom_y - self.top_height
    }
}

/// Ordered gate sequence plus the RNG that shapes new gates
#[derive(Debug, Clone)]
pub struct Gates {
    obstacles: Vec<Obstacle>,
    width: f32,
    gap: f32,
    min_top_height: u32,
    top_height_range: u32,
    rng: Pcg32,
    next_id: u32,
}

impl Gates {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            width: tuning.gate_width,
            gap: tuning.gate_gap,
            min_top_height: tuning.min_top_height,
            top_height_range: tuning.top_height_range.max(1),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Append a gate at the right edge of the playfield
    pub fn spawn(&mut self, playfield_width: f32) -> &Obstacle {
        let top = self
            .min_top_height
            .saturating_add(self.rng.random_range(0..self.top_height_range));
        self.push(playfield_width, top as f32)
    }

    fn push(&mut self, x: f32, top_height: f32) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        let gate = Obstacle::new(id, x, self.width, top_height, self.gap);
        log::debug!("Gate {} spawned at x={} (top {})", id, x, top_height);
        self.obstacles.push(gate);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every gate left
    pub fn advance(&mut self, speed: f32) {
        for gate in &mut self.obstacles {
            gate.x -= speed;
        }
    }

    /// Drop gates whose right edge is left of the playfield. Returns how many went.
    pub fn recycle(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|g| g.right() >= 0.0);
        let removed = before - self.obstacles.len();
        if removed > 0 {
            log::debug!("Recycled {} gate(s), {} active", removed, self.obstacles.len());
        }
        removed
    }

    /// Spawn when empty or once the newest gate crossed `playfield_width - trigger_margin`
    pub fn maybe_spawn(&mut self, playfield_width: f32, trigger_margin: f32) -> bool {
        let due = match self.obstacles.last() {
            None => true,
            Some(last) => last.x < playfield_width - trigger_margin,
        };
        if due {
            self.spawn(playfield_width);
        }
        due
    }

    /// Forget every gate; the RNG and id counter keep going
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Insert a gate with a chosen height (scenario tests)
    #[cfg(test)]
    pub(crate) fn place(&mut self, x: f32, top_height: f32) -> u32 {
        self.push(x, top_height).id
    }
}
