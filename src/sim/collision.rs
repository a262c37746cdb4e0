//! Collision detection and scoring
//!
//! Everything is axis-aligned: the avatar is a box, a gate is a column with a
//! vertical opening, the ground is a horizontal line.

use super::gates::Obstacle;
use super::state::{Avatar, Collision};

/// Outcome of one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// First terminal condition found (ground wins over gates)
    pub collision: Option<Collision>,
    /// Gates newly passed this pass
    pub scored: u32,
}

/// Half-open interval overlap: `[a_min, a_max)` vs `[b_min, b_max)`
#[inline]
pub fn spans_overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> bool {
    a_min < b_max && a_max > b_min
}

/// Avatar's bottom edge is below the top of the ground band
#[inline]
pub fn hits_ground(avatar: &Avatar, ground_top: f32) -> bool {
    avatar.bottom() > ground_top
}

/// Avatar overlaps a gate column and sticks out of its opening
pub fn hits_gate(avatar: &Avatar, gate: &Obstacle) -> bool {
    spans_overlap(avatar.left(), avatar.right(), gate.x, gate.right())
        && (avatar.top() < gate.top_height || avatar.bottom() > gate.bottom_y)
}

/// Gate is fully behind the avatar: its right edge lies left of the avatar's left edge
#[inline]
pub fn is_cleared(avatar: &Avatar, gate: &Obstacle) -> bool {
    gate.right() < avatar.left()
}

/// Test the avatar against the ground and every gate, then run the scoring pass.
///
/// The scoring pass always completes, even when a collision was found, so the
/// result of a tick does not depend on the order of the two checks.
pub fn evaluate(avatar: &Avatar, gates: &mut [Obstacle], ground_top: f32) -> Evaluation {
    let mut collision = if hits_ground(avatar, ground_top) {
        Some(Collision::Ground)
    } else {
        None
    };

    if collision.is_none() {
        collision = gates
            .iter()
            .find(|gate| hits_gate(avatar, gate))
            .map(|gate| Collision::Gate { id: gate.id });
    }

    let mut scored = 0;
    for gate in gates.iter_mut().filter(|g| !g.passed) {
        if is_cleared(avatar, gate) {
            gate.passed = true;
            scored += 1;
        }
    }

    Evaluation { collision, scored }
}
