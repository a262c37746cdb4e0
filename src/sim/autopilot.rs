//! Idle/demo mode: a tiny controller that flies through gates
//!
//! Aims to keep the avatar's bottom edge a little above the bottom barrier of
//! the next gate it has not cleared yet. Flaps only while falling, so one
//! flap is allowed to play out before the next one.

use super::state::GameSession;

/// Distance kept between the avatar's bottom edge and the lower barrier
const BOTTOM_MARGIN: f32 = 12.0;
/// Cruise height above the ground when no gate is ahead
const CRUISE_ABOVE_GROUND: f32 = 160.0;

/// Should the avatar jump this tick?
pub fn wants_flap(session: &GameSession) -> bool {
    if !session.phase.is_running() {
        return false;
    }

    let avatar = &session.avatar;
    let target_bottom = session
        .obstacles()
        .iter()
        .find(|gate| gate.right() >= avatar.left())
        .map(|gate| gate.bottom_y - BOTTOM_MARGIN)
        .unwrap_or(session.ground_top() - CRUISE_ABOVE_GROUND);

    avatar.velocity >= 0.0 && avatar.bottom() > target_bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Playfield};
    use crate::sim::tick::{jump, tick};
    use crate::tuning::Tuning;

    fn running_session() -> GameSession {
        let tuning = Tuning {
            countdown_start: 0,
            ..Default::default()
        };
        GameSession::new(tuning, Playfield::new(800.0, 640.0), 77)
    }

    #[test]
    fn test_never_flaps_outside_running() {
        let mut session = running_session();
        session.avatar.pos.y = 480.0;
        session.phase = GamePhase::Over;
        assert!(!wants_flap(&session));
        session.phase = GamePhase::Idle { countdown: 2 };
        assert!(!wants_flap(&session));
    }

    #[test]
    fn test_flaps_when_falling_below_gap() {
        let mut session = running_session();
        session.gates.place(300.0, 100.0);
        // Bottom edge 255 is within 12px of bottom_y 260
        session.avatar.pos.y = 215.0;
        session.avatar.velocity = 1.0;
        assert!(wants_flap(&session));

        // Rising: let the previous flap play out
        session.avatar.velocity = -3.0;
        assert!(!wants_flap(&session));
    }

    #[test]
    fn test_ignores_cleared_gates() {
        let mut session = running_session();
        session.gates.place(0.0, 20.0); // right edge 80, behind the avatar
        session.avatar.pos.y = 200.0;
        session.avatar.velocity = 0.0;
        // No gate ahead: cruise target is 540 - 160 = 380, bottom is 240
        assert!(!wants_flap(&session));
    }

    #[test]
    fn test_holds_altitude_before_first_gate() {
        let mut session = running_session();
        // The first gate appears at x=800 and needs ~220 ticks to reach the avatar
        for _ in 0..120 {
            if wants_flap(&session) {
                jump(&mut session);
            }
            tick(&mut session);
        }
        assert!(session.phase.is_running());
    }
}
