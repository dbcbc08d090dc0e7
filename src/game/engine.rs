use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    models::{Bonus, GameState, GameStatus, PowerUpType, Progress, Tile},
    store::KeyValueStore,
};

use super::{
    grid::GridGenerator,
    path::PathTracker,
    scheduler::{Scheduler, TaskHandle, TaskKind},
    scorer::{Reward, Scorer, MIN_WORD_LENGTH},
    validator::WordValidator,
};

pub const TICK_MS: u64 = 100;
pub const FREEZE_DURATION_MS: u64 = 5_000;
pub const COMBO_DECAY_MS: u64 = 3_000;
pub const BONUS_DISPLAY_MS: u64 = 1_500;

/// Rejected submissions (3+ letters) needed to earn a shuffle
pub const INVALID_WORDS_FOR_SHUFFLE: u32 = 3;
/// Accepted words of this length or more count towards a freeze
pub const LONG_WORD_LENGTH: usize = 4;
pub const LONG_WORDS_FOR_FREEZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooShort,
    AlreadyFound,
    NotInDictionary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Reward),
    Rejected(RejectReason),
    /// No game in progress
    Ignored,
}

/// Handles of the engine's pending deferred callbacks
#[derive(Debug, Default)]
struct Timers {
    tick: Option<TaskHandle>,
    freeze: Option<TaskHandle>,
    combo_decay: Option<TaskHandle>,
    bonus_clear: Option<TaskHandle>,
}

/// Single-player game state machine.
///
/// All mutation goes through `&mut self`; deferred work (timer ticks, freeze
/// expiry, combo decay, bonus clearing) is scheduled on an internal logical
/// clock and runs when the host calls [`GameEngine::advance`].
pub struct GameEngine {
    state: GameState,
    revision: u64,
    validator: Arc<dyn WordValidator>,
    store: Arc<dyn KeyValueStore>,
    scheduler: Scheduler,
    timers: Timers,
    path: PathTracker,
    bonus: Option<Bonus>,
    invalid_words: u32,
    long_words: u32,
    rng: StdRng,
}

impl GameEngine {
    /// Create an engine in READY state with progression read from `store`
    pub fn new(validator: Arc<dyn WordValidator>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_rng(validator, store, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(
        validator: Arc<dyn WordValidator>,
        store: Arc<dyn KeyValueStore>,
        rng: StdRng,
    ) -> Self {
        let progress = Progress::load(store.as_ref());
        let state = GameState::ready(progress, Scorer::initial_time(progress.level));

        Self {
            state,
            revision: 0,
            validator,
            store,
            scheduler: Scheduler::new(),
            timers: Timers::default(),
            path: PathTracker::new(),
            bonus: None,
            invalid_words: 0,
            long_words: 0,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Incremented on every observable change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn path(&self) -> &[Tile] {
        self.path.path()
    }

    pub fn current_word(&self) -> String {
        self.path.current_word()
    }

    pub fn bonus(&self) -> Option<Bonus> {
        self.bonus
    }

    pub fn is_frozen(&self) -> bool {
        self.timers.freeze.is_some()
    }

    /// Logical time in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Logical time of the next deferred callback
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Begin a fresh game. Progression carries over; everything else resets.
    pub fn start(&mut self) {
        self.cancel_all();
        self.path.reset();
        self.invalid_words = 0;
        self.long_words = 0;

        let initial_time = Scorer::initial_time(self.state.level);
        let grid = GridGenerator::generate(&mut self.rng);
        let next = GameState {
            status: GameStatus::Playing,
            grid,
            timer: initial_time,
            initial_time,
            ..GameState::ready(self.state.progress(), initial_time)
        };
        self.replace(next);
        self.timers.tick = Some(self.scheduler.schedule(TaskKind::Tick, TICK_MS));

        tracing::info!(
            "Game started at level {} with {}ms on the clock",
            self.state.level,
            initial_time
        );
    }

    /// Run every deferred callback due within the next `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now() + elapsed_ms;
        while let Some((handle, kind)) = self.scheduler.pop_due(until) {
            self.fire(handle, kind);
        }
        self.scheduler.advance_to(until);
    }

    /// Cancel all pending callbacks. Call when the host goes away.
    pub fn shutdown(&mut self) {
        self.cancel_all();
        self.path.reset();
    }

    pub fn submit_word(&mut self, word: &str) -> SubmitOutcome {
        if !self.state.is_playing() {
            return SubmitOutcome::Ignored;
        }

        let word = word.to_lowercase();
        let length = word.chars().count();

        let rejection = if length < MIN_WORD_LENGTH {
            Some(RejectReason::TooShort)
        } else if self.state.words_found.contains(&word) {
            Some(RejectReason::AlreadyFound)
        } else if !self.validator.has(&word) {
            Some(RejectReason::NotInDictionary)
        } else {
            None
        };

        match rejection {
            Some(reason) => {
                self.reject(length, reason);
                tracing::debug!("Rejected {:?}: {:?}", word, reason);
                SubmitOutcome::Rejected(reason)
            }
            None => {
                let reward = self.accept(word, length);
                SubmitOutcome::Accepted(reward)
            }
        }
    }

    /// Use a power-up. Returns false when it is not available.
    pub fn apply_power_up(&mut self, kind: PowerUpType) -> bool {
        if !self.state.is_playing() || !self.state.power_ups.is_available(kind) {
            return false;
        }

        let power_ups = self.state.power_ups.with(kind, false);
        match kind {
            PowerUpType::FreezeTime => {
                self.cancel(TaskKind::Tick);
                self.cancel(TaskKind::FreezeExpiry);
                self.timers.freeze = Some(
                    self.scheduler
                        .schedule(TaskKind::FreezeExpiry, FREEZE_DURATION_MS),
                );
                self.replace(GameState {
                    power_ups,
                    ..self.state.clone()
                });
            }
            PowerUpType::Shuffle => {
                let grid = GridGenerator::shuffle(&self.state.grid, &mut self.rng);
                self.replace(GameState {
                    grid,
                    power_ups,
                    ..self.state.clone()
                });
            }
        }

        tracing::info!("Applied power-up {:?}", kind);
        true
    }

    pub fn interaction_start(&mut self, row: usize, col: usize) {
        if !self.state.is_playing() {
            return;
        }
        if let Some(tile) = self.tile_at(row, col) {
            self.path.start(tile);
            self.touch();
        }
    }

    pub fn interaction_move(&mut self, row: usize, col: usize) {
        if let Some(tile) = self.tile_at(row, col) {
            if self.path.extend(tile) {
                self.touch();
            }
        }
    }

    /// Finish the drag and submit the spelled word, if any
    pub fn interaction_end(&mut self) -> Option<(String, SubmitOutcome)> {
        let was_dragging = self.path.is_dragging();
        let word = self.path.finish();
        if was_dragging {
            self.touch();
        }

        word.map(|word| {
            let outcome = self.submit_word(&word);
            (word, outcome)
        })
    }

    fn tile_at(&self, row: usize, col: usize) -> Option<Tile> {
        self.state.grid.get(row)?.get(col).cloned()
    }

    fn reject(&mut self, length: usize, reason: RejectReason) {
        let mut power_ups = self.state.power_ups;

        if length >= MIN_WORD_LENGTH {
            self.invalid_words += 1;
            if self.invalid_words >= INVALID_WORDS_FOR_SHUFFLE {
                self.invalid_words = 0;
                power_ups = power_ups.with(PowerUpType::Shuffle, true);
                tracing::info!("Shuffle earned after repeated misses ({:?})", reason);
            }
        }

        self.cancel(TaskKind::ComboDecay);
        self.replace(GameState {
            combo: 1.0,
            power_ups,
            ..self.state.clone()
        });
    }

    fn accept(&mut self, word: String, length: usize) -> Reward {
        let reward = Scorer::word_reward(length, self.state.combo);
        let mut power_ups = self.state.power_ups;

        if length >= LONG_WORD_LENGTH {
            self.long_words += 1;
            if self.long_words >= LONG_WORDS_FOR_FREEZE {
                self.long_words = 0;
                power_ups = power_ups.with(PowerUpType::FreezeTime, true);
                tracing::info!("Freeze earned after {} long words", LONG_WORDS_FOR_FREEZE);
            }
        }

        tracing::debug!(
            "Accepted {:?} for {} points and {}ms at combo {}",
            word,
            reward.score,
            reward.time,
            self.state.combo
        );

        let mut words_found = Vec::with_capacity(self.state.words_found.len() + 1);
        words_found.push(word);
        words_found.extend(self.state.words_found.iter().cloned());

        self.replace(GameState {
            score: self.state.score + reward.score,
            timer: self.state.timer + reward.time,
            combo: Scorer::next_combo(self.state.combo),
            words_found,
            power_ups,
            ..self.state.clone()
        });

        self.cancel(TaskKind::BonusClear);
        self.bonus = Some(Bonus {
            score: reward.score,
            time: reward.time,
        });
        self.timers.bonus_clear = Some(
            self.scheduler
                .schedule(TaskKind::BonusClear, BONUS_DISPLAY_MS),
        );

        self.cancel(TaskKind::ComboDecay);
        self.timers.combo_decay = Some(
            self.scheduler
                .schedule(TaskKind::ComboDecay, COMBO_DECAY_MS),
        );

        reward
    }

    fn fire(&mut self, handle: TaskHandle, kind: TaskKind) {
        let slot = self.slot(kind);
        if *slot != Some(handle) {
            tracing::warn!("Dropping stale {:?} callback", kind);
            return;
        }
        *slot = None;

        match kind {
            TaskKind::Tick => self.on_tick(),
            TaskKind::FreezeExpiry => {
                tracing::debug!("Freeze expired");
                if self.state.is_playing() {
                    self.timers.tick = Some(self.scheduler.schedule(TaskKind::Tick, TICK_MS));
                }
                self.touch();
            }
            TaskKind::ComboDecay => {
                if self.state.combo != 1.0 {
                    self.replace(GameState {
                        combo: 1.0,
                        ..self.state.clone()
                    });
                }
            }
            TaskKind::BonusClear => {
                self.bonus = None;
                self.touch();
            }
        }
    }

    fn on_tick(&mut self) {
        if !self.state.is_playing() {
            return;
        }

        let timer = self.state.timer.saturating_sub(TICK_MS);
        self.replace(GameState {
            timer,
            ..self.state.clone()
        });

        if timer == 0 {
            self.finish();
        } else {
            self.timers.tick = Some(self.scheduler.schedule(TaskKind::Tick, TICK_MS));
        }
    }

    /// Time ran out: settle progression, persist it and stop the clock.
    /// Other engines may share the store, so the earned XP is added to the
    /// stored record rather than to this engine's copy.
    fn finish(&mut self) {
        self.cancel(TaskKind::Tick);
        self.path.reset();

        let stored = Progress::load(self.store.as_ref());
        let score = self.state.score;
        let high_score = score.max(self.state.high_score).max(stored.high_score);
        let xp = stored.xp + Scorer::xp_for_game(score);
        let level = Scorer::level_for_xp(xp)
            .max(self.state.level)
            .max(stored.level);

        self.replace(GameState {
            status: GameStatus::Finished,
            high_score,
            xp,
            level,
            ..self.state.clone()
        });

        if let Err(e) = self.state.progress().save(self.store.as_ref()) {
            tracing::warn!("Failed to persist progress: {}", e);
        }

        tracing::info!(
            "Game finished with score {} ({} words), level {} / {} xp",
            score,
            self.state.words_found.len(),
            level,
            xp
        );
    }

    fn slot(&mut self, kind: TaskKind) -> &mut Option<TaskHandle> {
        match kind {
            TaskKind::Tick => &mut self.timers.tick,
            TaskKind::FreezeExpiry => &mut self.timers.freeze,
            TaskKind::ComboDecay => &mut self.timers.combo_decay,
            TaskKind::BonusClear => &mut self.timers.bonus_clear,
        }
    }

    fn cancel(&mut self, kind: TaskKind) {
        if let Some(handle) = self.slot(kind).take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_all(&mut self) {
        self.scheduler.clear();
        self.timers = Timers::default();
        if self.bonus.take().is_some() {
            self.touch();
        }
    }

    fn replace(&mut self, next: GameState) {
        self.state = next;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("status", &self.state.status)
            .field("timer", &self.state.timer)
            .field("score", &self.state.score)
            .field("pending_tasks", &self.scheduler.pending())
            .finish()
    }
}
