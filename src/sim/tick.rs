//! Fixed-step simulation tick and phase transitions
//!
//! One call to [`tick`] is one display refresh worth of simulation. The
//! countdown is advanced separately by [`countdown_tick`], which the driver
//! calls from a wall-clock timer so its cadence does not follow the frame rate.

use super::collision::evaluate;
use super::state::{GameEvent, GamePhase, GameSession, Playfield};

/// Advance a running round by one tick. Does nothing outside `Running`.
pub fn tick(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !session.phase.is_running() {
        return events;
    }

    session.time_ticks += 1;

    // Physics
    session.avatar.integrate(session.tuning.gravity);

    // Gates
    let width = session.playfield.width;
    session.gates.advance(session.tuning.scroll_speed);
    session.gates.recycle();
    session
        .gates
        .maybe_spawn(width, session.tuning.spawn_trigger_margin);

    // Collisions and scoring
    let ground_top = session.ground_top();
    let eval = evaluate(&session.avatar, session.gates.as_mut_slice(), ground_top);

    for _ in 0..eval.scored {
        session.score += 1;
        events.push(GameEvent::Scored {
            score: session.score,
        });
    }

    debug_assert!(
        session
            .obstacles()
            .iter()
            .all(|g| (g.gap() - session.tuning.gate_gap).abs() < 1e-3),
        "gate opening drifted from the configured gap"
    );

    if let Some(cause) = eval.collision {
        session.phase = GamePhase::Over;
        log::info!(
            "Round {} over after {} ticks: {:?}, score {}",
            session.round,
            session.time_ticks,
            cause,
            session.score
        );
        events.push(GameEvent::Crashed { cause });
    }

    events
}

/// One firing of the countdown timer. Does nothing outside `Idle`.
pub fn countdown_tick(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();

    let GamePhase::Idle { countdown } = session.phase else {
        return events;
    };

    let remaining = countdown.saturating_sub(1);
    events.push(GameEvent::CountdownTick { remaining });

    if remaining == 0 {
        session.phase = GamePhase::Running;
        log::info!("Round {} started", session.round);
        events.push(GameEvent::Started);
    } else {
        session.phase = GamePhase::Idle {
            countdown: remaining,
        };
    }

    events
}

/// Jump input. Accepted only while running; last write wins.
pub fn jump(session: &mut GameSession) -> Option<GameEvent> {
    if !session.phase.is_running() {
        return None;
    }
    session.avatar.apply_impulse(session.tuning.jump_impulse);
    Some(GameEvent::Jumped)
}

/// Restart after a game over: fresh entities, new playfield, countdown again.
///
/// Returns `None` (and changes nothing) unless the round is over.
pub fn restart(session: &mut GameSession, playfield: Playfield) -> Option<GameEvent> {
    if !session.phase.is_over() {
        log::warn!("Restart ignored in phase {:?}", session.phase);
        return None;
    }
    session.reset_round(playfield);
    log::info!(
        "Round {} ready ({}x{}), phase {:?}",
        session.round,
        session.playfield.width,
        session.playfield.height,
        session.phase
    );
    Some(GameEvent::Restarted)
}
