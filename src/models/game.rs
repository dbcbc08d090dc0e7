use serde::{Deserialize, Serialize};

use super::Progress;

/// A single letter cell. `id` is `"{row}-{col}"` and never changes for the
/// lifetime of a grid; shuffling only rewrites `letter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub row: usize,
    pub col: usize,
    pub letter: char,
}

impl Tile {
    pub fn new(row: usize, col: usize, letter: char) -> Self {
        Self {
            id: format!("{}-{}", row, col),
            row,
            col,
            letter,
        }
    }
}

pub type Grid = Vec<Vec<Tile>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Ready,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerUpType {
    FreezeTime,
    Shuffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    #[serde(rename = "type")]
    pub kind: PowerUpType,
    pub is_available: bool,
}

/// Availability of every power-up type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    pub freeze_time: PowerUp,
    pub shuffle: PowerUp,
}

impl PowerUps {
    pub fn none() -> Self {
        Self {
            freeze_time: PowerUp {
                kind: PowerUpType::FreezeTime,
                is_available: false,
            },
            shuffle: PowerUp {
                kind: PowerUpType::Shuffle,
                is_available: false,
            },
        }
    }

    pub fn get(&self, kind: PowerUpType) -> PowerUp {
        match kind {
            PowerUpType::FreezeTime => self.freeze_time,
            PowerUpType::Shuffle => self.shuffle,
        }
    }

    pub fn is_available(&self, kind: PowerUpType) -> bool {
        self.get(kind).is_available
    }

    /// Copy with the availability of `kind` replaced
    pub fn with(self, kind: PowerUpType, is_available: bool) -> Self {
        let mut next = self;
        match kind {
            PowerUpType::FreezeTime => next.freeze_time.is_available = is_available,
            PowerUpType::Shuffle => next.shuffle.is_available = is_available,
        }
        next
    }
}

/// Ephemeral reward notification shown after an accepted word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub score: u32,
    pub time: u64,
}

/// Authoritative game snapshot. Transitions replace the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub grid: Grid,
    /// Milliseconds remaining
    pub timer: u64,
    /// Milliseconds the current game started with
    pub initial_time: u64,
    pub score: u32,
    pub combo: f64,
    /// Newest first, lowercase, unique
    pub words_found: Vec<String>,
    pub power_ups: PowerUps,
    pub high_score: u32,
    pub xp: u32,
    pub level: u32,
}

impl GameState {
    /// The pre-game state hydrated from persisted progression
    pub fn ready(progress: Progress, initial_time: u64) -> Self {
        Self {
            status: GameStatus::Ready,
            grid: Vec::new(),
            timer: initial_time,
            initial_time,
            score: 0,
            combo: 1.0,
            words_found: Vec::new(),
            power_ups: PowerUps::none(),
            high_score: progress.high_score,
            xp: progress.xp,
            level: progress.level,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            high_score: self.high_score,
            xp: self.xp,
            level: self.level,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_from_position() {
        let tile = Tile::new(3, 1, 'Q');
        assert_eq!(tile.id, "3-1");
    }

    #[test]
    fn test_power_ups_with() {
        let power_ups = PowerUps::none().with(PowerUpType::Shuffle, true);
        assert!(power_ups.is_available(PowerUpType::Shuffle));
        assert!(!power_ups.is_available(PowerUpType::FreezeTime));

        let power_ups = power_ups.with(PowerUpType::Shuffle, false);
        assert_eq!(power_ups, PowerUps::none());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&GameStatus::Playing).unwrap();
        assert_eq!(json, "\"PLAYING\"");
        let json = serde_json::to_string(&PowerUpType::FreezeTime).unwrap();
        assert_eq!(json, "\"FREEZE_TIME\"");
    }
}
