//! Deferred callbacks for the game engine.
//!
//! The engine runs on a logical millisecond clock. Hosts drive it forward
//! with real elapsed time; tests drive it directly.

/// What a scheduled task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Periodic timer decrement
    Tick,
    /// End of a freeze power-up
    FreezeExpiry,
    /// Combo falls back to 1 after inactivity
    ComboDecay,
    /// Bonus notification is hidden
    BonusClear,
}

/// Handle to a scheduled task. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask {
    handle: TaskHandle,
    kind: TaskKind,
    deadline: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `kind` to fire `delay_ms` from now
    pub fn schedule(&mut self, kind: TaskKind, delay_ms: u64) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            handle,
            kind,
            deadline: self.now + delay_ms,
        });
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.iter().map(|task| task.deadline).min()
    }

    /// Remove the earliest task due at or before `until` and move the clock to
    /// its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskHandle, TaskKind)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.deadline <= until)
            .min_by_key(|(_, task)| (task.deadline, task.handle))
            .map(|(index, _)| index)?;

        let task = self.tasks.swap_remove(index);
        self.now = self.now.max(task.deadline);
        Some((task.handle, task.kind))
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    /// Cancel every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
