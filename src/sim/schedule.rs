//! Wall-clock task scheduling
//!
//! The countdown and the delayed Die cue run on real time, not on frames.
//! Tasks are polled with the current time in milliseconds and fire in due
//! order, one at a time, so a handler can cancel its own task (or any other)
//! before the next firing is looked at.

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// What a task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Decrement the pre-start countdown
    CountdownTick,
    /// Play the Die cue after a Hit
    DieCue,
}

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    kind: TaskKind,
    due_ms: f64,
    /// Repeating tasks re-arm from their previous due time
    period_ms: Option<f64>,
}

/// Shortest period accepted for repeating tasks
const MIN_PERIOD_MS: f64 = 1.0;

/// Pending wall-clock tasks
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, kind: TaskKind, due_ms: f64, period_ms: Option<f64>) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Task {
            id,
            kind,
            due_ms,
            period_ms,
        });
        id
    }

    /// Fire once, `delay_ms` after `now_ms`
    pub fn schedule_once(&mut self, kind: TaskKind, now_ms: f64, delay_ms: f64) -> TaskId {
        self.insert(kind, now_ms + delay_ms.max(0.0), None)
    }

    /// Fire every `period_ms`, first firing one period after `now_ms`
    pub fn schedule_every(&mut self, kind: TaskKind, now_ms: f64, period_ms: f64) -> TaskId {
        let period = period_ms.max(MIN_PERIOD_MS);
        self.insert(kind, now_ms + period, Some(period))
    }

    /// Cancel a task. Returns false if it already finished or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pop the earliest firing due at `now_ms` (ties go to the older task).
    ///
    /// Repeating tasks are re-armed before being returned; call in a loop
    /// until it yields `None` to catch up after a long frame.
    pub fn next_due(&mut self, now_ms: f64) -> Option<(TaskId, TaskKind)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[idx];
        let fired = (task.id, task.kind);
        match task.period_ms {
            Some(period) => task.due_ms += period,
            None => {
                self.tasks.remove(idx);
            }
        }
        Some(fired)
    }
}
