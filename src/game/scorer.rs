/// Points per word length; longer words reuse the last entry
pub const SCORE_VALUES: [(usize, u32); 6] = [
    (3, 10),
    (4, 25),
    (5, 50),
    (6, 100),
    (7, 150),
    (8, 200),
];
/// Milliseconds added per word length; longer words reuse the last entry
pub const TIME_BONUSES: [(usize, u64); 4] = [(3, 1000), (4, 2000), (5, 3000), (6, 4000)];

pub const BASE_INITIAL_TIME: u64 = 20_000;
pub const TIME_PER_LEVEL: u64 = 1_000;
pub const XP_PER_LEVEL: u32 = 2_500;
pub const BASE_XP_PER_GAME: u32 = 50;

pub const MIN_WORD_LENGTH: usize = 3;
pub const COMBO_STEP: f64 = 0.5;
pub const MAX_COMBO: f64 = 5.0;

/// Score and time earned by one accepted word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub score: u32,
    /// Milliseconds added to the timer
    pub time: u64,
}

pub struct Scorer;

impl Scorer {
    /// Calculate the reward for a word of `length` letters at the current combo.
    ///
    /// Both values are the table entry multiplied by the combo and floored.
    /// Words shorter than the table minimum earn nothing.
    pub fn word_reward(length: usize, combo: f64) -> Reward {
        let base_score = lookup(&SCORE_VALUES, length);
        let base_time = lookup(&TIME_BONUSES, length);

        Reward {
            score: (base_score as f64 * combo).floor() as u32,
            time: (base_time as f64 * combo).floor() as u64,
        }
    }

    /// Combo after one more accepted word
    pub fn next_combo(combo: f64) -> f64 {
        (combo + COMBO_STEP).min(MAX_COMBO)
    }

    /// XP granted when a game ends
    pub fn xp_for_game(score: u32) -> u32 {
        BASE_XP_PER_GAME + score / 10
    }

    pub fn level_for_xp(xp: u32) -> u32 {
        xp / XP_PER_LEVEL + 1
    }

    /// Starting clock for a game at `level`
    pub fn initial_time(level: u32) -> u64 {
        BASE_INITIAL_TIME + u64::from(level.saturating_sub(1)) * TIME_PER_LEVEL
    }
}

fn lookup<T: Copy + Default>(table: &[(usize, T)], length: usize) -> T {
    match table.iter().find(|(len, _)| *len == length) {
        Some((_, value)) => *value,
        None => match table.last() {
            Some((max_len, value)) if length > *max_len => *value,
            _ => T::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rewards() {
        assert_eq!(Scorer::word_reward(3, 1.0), Reward { score: 10, time: 1000 });
        assert_eq!(Scorer::word_reward(4, 1.0), Reward { score: 25, time: 2000 });
        assert_eq!(Scorer::word_reward(5, 1.0), Reward { score: 50, time: 3000 });
        assert_eq!(Scorer::word_reward(6, 1.0), Reward { score: 100, time: 4000 });
    }

    #[test]
    fn test_long_words_reuse_last_entry() {
        // Time bonus caps at 6 letters, score at 8
        assert_eq!(Scorer::word_reward(7, 1.0), Reward { score: 150, time: 4000 });
        assert_eq!(Scorer::word_reward(8, 1.0), Reward { score: 200, time: 4000 });
        assert_eq!(Scorer::word_reward(12, 1.0), Reward { score: 200, time: 4000 });
    }

    #[test]
    fn test_short_words_earn_nothing() {
        assert_eq!(Scorer::word_reward(2, 3.0), Reward { score: 0, time: 0 });
    }

    #[test]
    fn test_combo_multiplier_floors() {
        // 25 * 1.5 = 37.5, 2000 * 1.5 = 3000
        assert_eq!(Scorer::word_reward(4, 1.5), Reward { score: 37, time: 3000 });
        // 10 * 2.5 = 25, 1000 * 2.5 = 2500
        assert_eq!(Scorer::word_reward(3, 2.5), Reward { score: 25, time: 2500 });
    }

    #[test]
    fn test_combo_caps_at_five() {
        let mut combo = 1.0;
        for _ in 0..20 {
            combo = Scorer::next_combo(combo);
        }
        assert_eq!(combo, MAX_COMBO);
        assert_eq!(Scorer::next_combo(1.0), 1.5);
    }

    #[test]
    fn test_progression() {
        assert_eq!(Scorer::xp_for_game(0), 50);
        assert_eq!(Scorer::xp_for_game(459), 95);
        assert_eq!(Scorer::level_for_xp(0), 1);
        assert_eq!(Scorer::level_for_xp(2499), 1);
        assert_eq!(Scorer::level_for_xp(2500), 2);
        assert_eq!(Scorer::initial_time(1), 20_000);
        assert_eq!(Scorer::initial_time(4), 23_000);
    }
}
