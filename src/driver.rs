//! Per-frame driver
//!
//! Owns the session and the wall-clock scheduler, and routes the
//! simulation's events to the render adapter and the audio cue sink.
//! One call to [`Driver::frame`] per display refresh.

use crate::audio::{AudioCueSink, Cue};
use crate::renderer::RenderAdapter;
use crate::sim::{
    self, GameEvent, GamePhase, GameSession, Playfield, Scheduler, TaskId, TaskKind,
};

pub struct Driver<R: RenderAdapter, A: AudioCueSink> {
    session: GameSession,
    scheduler: Scheduler,
    countdown_task: Option<TaskId>,
    renderer: R,
    audio: A,
    muted: bool,
    frames: u64,
    /// Clock reading of the current frame or command
    now_ms: f64,
}

impl<R: RenderAdapter, A: AudioCueSink> Driver<R, A> {
    /// Take ownership of a fresh session and arm its countdown
    pub fn new(session: GameSession, renderer: R, audio: A, now_ms: f64) -> Self {
        let mut driver = Self {
            session,
            scheduler: Scheduler::new(),
            countdown_task: None,
            renderer,
            audio,
            muted: false,
            frames: 0,
            now_ms,
        };
        driver.arm_countdown(now_ms);
        driver
    }

    fn arm_countdown(&mut self, now_ms: f64) {
        if let GamePhase::Idle { countdown } = self.session.phase {
            let interval = self.session.tuning.countdown_interval_ms;
            self.countdown_task = Some(self.scheduler.schedule_every(
                TaskKind::CountdownTick,
                now_ms,
                interval,
            ));
            log::info!("Countdown from {} every {} ms", countdown, interval);
        }
    }

    fn cancel_countdown(&mut self) {
        if let Some(id) = self.countdown_task.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Run due timers, step the simulation once, then render
    pub fn frame(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        while let Some((_, kind)) = self.scheduler.next_due(now_ms) {
            match kind {
                TaskKind::CountdownTick => {
                    let events = sim::countdown_tick(&mut self.session);
                    self.dispatch(&events);
                    if !matches!(self.session.phase, GamePhase::Idle { .. }) {
                        self.cancel_countdown();
                    }
                }
                TaskKind::DieCue => self.emit(Cue::Die),
            }
        }

        let events = sim::tick(&mut self.session);
        self.dispatch(&events);

        self.renderer.render_frame(&self.session.snapshot());
        self.frames += 1;
    }

    /// Jump input; returns whether it was accepted
    pub fn jump(&mut self) -> bool {
        match sim::jump(&mut self.session) {
            Some(event) => {
                self.dispatch(&[event]);
                true
            }
            None => false,
        }
    }

    /// Restart after game over. A countdown still in flight is cancelled
    /// before the new one is armed; a pending Die cue still plays.
    pub fn restart(&mut self, playfield: Playfield, now_ms: f64) -> bool {
        if !self.session.phase.is_over() {
            log::warn!("Restart ignored in phase {:?}", self.session.phase);
            return false;
        }
        self.now_ms = now_ms;
        self.cancel_countdown();

        match sim::restart(&mut self.session, playfield) {
            Some(event) => {
                self.dispatch(&[event]);
                self.arm_countdown(now_ms);
                true
            }
            None => false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip mute and return the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "off" } else { "on" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Timers still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Jumped => self.emit(Cue::Jump),
                GameEvent::Scored { score } => {
                    log::debug!("Score {}", score);
                    self.emit(Cue::Score);
                }
                GameEvent::Crashed { .. } => {
                    self.emit(Cue::Hit);
                    self.scheduler.schedule_once(
                        TaskKind::DieCue,
                        self.now_ms,
                        self.session.tuning.die_cue_delay_ms,
                    );
                }
                GameEvent::CountdownTick { remaining } => {
                    log::debug!("Countdown {}", remaining);
                }
                GameEvent::Started | GameEvent::Restarted => {}
            }
        }
    }

    fn emit(&mut self, cue: Cue) {
        if !self.muted {
            self.audio.play_cue(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::renderer::HeadlessRenderer;
    use crate::tuning::Tuning;

    #[derive(Debug, Default)]
    struct RecordingAudio {
        cues: Vec<Cue>,
    }

    impl AudioCueSink for RecordingAudio {
        fn play_cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
    }

    fn driver(tuning: Tuning) -> Driver<HeadlessRenderer, RecordingAudio> {
        let session = GameSession::new(tuning, Playfield::new(800.0, 640.0), 99);
        Driver::new(
            session,
            HeadlessRenderer::default(),
            RecordingAudio::default(),
            0.0,
        )
    }

    fn count(cues: &[Cue], cue: Cue) -> usize {
        cues.iter().filter(|&&c| c == cue).count()
    }

    /// Drive frames on a simulated 60 Hz clock until `pred` holds
    fn run_until(
        d: &mut Driver<HeadlessRenderer, RecordingAudio>,
        now: &mut f64,
        max_frames: u32,
        pred: impl Fn(&Driver<HeadlessRenderer, RecordingAudio>) -> bool,
    ) {
        for _ in 0..max_frames {
            if pred(d) {
                return;
            }
            *now += FRAME_MS;
            d.frame(*now);
        }
    }

    #[test]
    fn test_countdown_follows_wall_clock() {
        let mut d = driver(Tuning::default());
        assert_eq!(d.pending_tasks(), 1);

        d.frame(999.0);
        assert_eq!(d.session().phase, GamePhase::Idle { countdown: 3 });
        d.frame(1000.0);
        assert_eq!(d.session().phase, GamePhase::Idle { countdown: 2 });
        d.frame(2000.0);
        assert_eq!(d.session().phase, GamePhase::Idle { countdown: 1 });
        d.frame(3000.0);
        assert_eq!(d.session().phase, GamePhase::Running);
        assert_eq!(d.pending_tasks(), 0);
    }

    #[test]
    fn test_countdown_catches_up_after_stall() {
        let mut d = driver(Tuning::default());
        // One long frame covers all three firings
        d.frame(3500.0);
        assert!(d.session().phase.is_running());
        assert_eq!(d.pending_tasks(), 0);
        // The tick in the same frame already ran
        assert_eq!(d.session().time_ticks, 1);
    }

    #[test]
    fn test_renders_once_per_frame() {
        let mut d = driver(Tuning::default());
        for i in 0..10 {
            d.frame(i as f64 * FRAME_MS);
        }
        assert_eq!(d.frames(), 10);
        assert_eq!(d.renderer().frames, 10);
    }

    #[test]
    fn test_crash_plays_hit_then_die_once() {
        let mut d = driver(Tuning {
            countdown_start: 0,
            ..Default::default()
        });
        let mut now = 0.0;
        run_until(&mut d, &mut now, 600, |d| d.session().phase.is_over());
        assert!(d.session().phase.is_over());
        assert_eq!(d.audio().cues, vec![Cue::Hit]);

        // Die follows after the delay
        let crash_at = now;
        run_until(&mut d, &mut now, 60, |d| d.audio().cues.len() > 1);
        assert!(now - crash_at >= 299.0);
        assert_eq!(d.audio().cues, vec![Cue::Hit, Cue::Die]);

        // Further frames change nothing
        let ticks = d.session().time_ticks;
        for _ in 0..120 {
            now += FRAME_MS;
            d.frame(now);
        }
        assert_eq!(count(&d.audio().cues, Cue::Hit), 1);
        assert_eq!(count(&d.audio().cues, Cue::Die), 1);
        assert_eq!(d.session().time_ticks, ticks);
    }

    #[test]
    fn test_jump_cue_only_while_running() {
        let mut d = driver(Tuning::default());
        assert!(!d.jump());
        assert!(d.audio().cues.is_empty());

        d.frame(3000.0);
        assert!(d.jump());
        assert_eq!(d.audio().cues, vec![Cue::Jump]);
        assert_eq!(d.session().avatar.velocity, -8.0);
    }

    #[test]
    fn test_mute_gates_cues_not_simulation() {
        let mut d = driver(Tuning {
            countdown_start: 0,
            ..Default::default()
        });
        d.set_muted(true);
        assert!(d.jump());
        assert_eq!(d.session().avatar.velocity, -8.0);

        let mut now = 0.0;
        run_until(&mut d, &mut now, 600, |d| d.session().phase.is_over());
        for _ in 0..60 {
            now += FRAME_MS;
            d.frame(now);
        }
        assert!(d.audio().cues.is_empty());

        assert!(!d.toggle_mute());
        assert!(!d.is_muted());
    }

    #[test]
    fn test_restart_only_from_over() {
        let mut d = driver(Tuning::default());
        assert!(!d.restart(Playfield::new(800.0, 640.0), 0.0));
        assert_eq!(d.session().round, 1);
        // Countdown timer untouched
        assert_eq!(d.pending_tasks(), 1);
    }

    #[test]
    fn test_restart_rearms_countdown() {
        let mut d = driver(Tuning {
            countdown_start: 2,
            ..Default::default()
        });
        let mut now = 0.0;
        run_until(&mut d, &mut now, 1000, |d| d.session().phase.is_over());
        assert!(d.session().phase.is_over());
        // Let the Die cue play out
        for _ in 0..30 {
            now += FRAME_MS;
            d.frame(now);
        }
        assert_eq!(d.audio().cues, vec![Cue::Hit, Cue::Die]);
        assert_eq!(d.pending_tasks(), 0);

        assert!(d.restart(Playfield::new(600.0, 500.0), now));
        assert_eq!(d.session().phase, GamePhase::Idle { countdown: 2 });
        assert_eq!(d.session().playfield, Playfield::new(600.0, 500.0));
        assert_eq!(d.session().score, 0);
        assert!(d.session().obstacles().is_empty());
        assert_eq!(d.pending_tasks(), 1);

        let restart_at = now;
        d.frame(restart_at + 1000.0);
        assert_eq!(d.session().phase, GamePhase::Idle { countdown: 1 });
        d.frame(restart_at + 2000.0);
        assert!(d.session().phase.is_running());
        assert_eq!(d.pending_tasks(), 0);
    }

    #[test]
    fn test_quick_restart_still_plays_die() {
        let mut d = driver(Tuning {
            countdown_start: 1,
            ..Default::default()
        });
        let mut now = 0.0;
        run_until(&mut d, &mut now, 1000, |d| d.session().phase.is_over());
        assert_eq!(d.audio().cues, vec![Cue::Hit]);

        // Restart well inside the Die delay
        now += 50.0;
        assert!(d.restart(Playfield::new(800.0, 640.0), now));
        // Die cue plus the new countdown
        assert_eq!(d.pending_tasks(), 2);

        // Past the Die delay and the new one-second countdown
        for _ in 0..70 {
            now += FRAME_MS;
            d.frame(now);
        }
        assert_eq!(count(&d.audio().cues, Cue::Hit), 1);
        assert_eq!(count(&d.audio().cues, Cue::Die), 1);
        assert!(d.session().phase.is_running());
        assert_eq!(d.session().round, 2);
    }

    #[test]
    fn test_restart_during_countdown_keeps_single_timer() {
        let mut d = driver(Tuning::default());
        d.frame(1000.0);
        // Not over: rejected, the running countdown keeps its cadence
        assert!(!d.restart(Playfield::new(800.0, 640.0), 1500.0));
        d.frame(2000.0);
        assert_eq!(d.session().phase, GamePhase::Idle { countdown: 1 });
        assert_eq!(d.pending_tasks(), 1);
    }

    #[test]
    fn test_autopilot_scores_with_cues() {
        let mut d = driver(Tuning {
            countdown_start: 0,
            ..Default::default()
        });
        let mut now = 0.0;
        for _ in 0..3000 {
            if sim::autopilot::wants_flap(d.session()) {
                d.jump();
            }
            now += FRAME_MS;
            d.frame(now);
        }
        let score = d.session().score as usize;
        assert!(score > 0);
        assert_eq!(count(&d.audio().cues, Cue::Score), score);
    }
}
