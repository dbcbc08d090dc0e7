use once_cell::sync::Lazy;

/// Vowels used for the minimum-vowel guarantee
pub const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Letter frequency distribution for English (approximate, percent)
/// Used for weighted random generation
pub const LETTER_FREQUENCIES: [(char, f32); 26] = [
    ('E', 12.7),
    ('T', 9.1),
    ('A', 8.2),
    ('O', 7.5),
    ('I', 7.0),
    ('N', 6.7),
    ('S', 6.3),
    ('H', 6.1),
    ('R', 6.0),
    ('D', 4.3),
    ('L', 4.0),
    ('C', 2.8),
    ('U', 2.8),
    ('M', 2.4),
    ('W', 2.4),
    ('F', 2.2),
    ('G', 2.0),
    ('Y', 2.0),
    ('P', 1.9),
    ('B', 1.5),
    ('V', 1.0),
    ('K', 0.8),
    ('J', 0.2),
    ('X', 0.2),
    ('Q', 0.1),
    ('Z', 0.1),
];

/// Weighted letter pool: each letter repeated round(frequency * 10) times.
/// A uniform pick from this pool follows the frequency table.
pub static LETTER_POOL: Lazy<Vec<char>> = Lazy::new(|| {
    LETTER_FREQUENCIES
        .iter()
        .flat_map(|&(letter, freq)| {
            let count = (freq * 10.0).round() as usize;
            std::iter::repeat_n(letter, count)
        })
        .collect()
});

pub fn is_vowel(letter: char) -> bool {
    VOWELS.contains(&letter.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowels() {
        assert!(is_vowel('A'));
        assert!(is_vowel('e'));
        assert!(!is_vowel('Y'));
        assert!(!is_vowel('Z'));
    }

    #[test]
    fn test_letter_pool_weights() {
        let count = |c: char| LETTER_POOL.iter().filter(|&&l| l == c).count();
        assert_eq!(count('E'), 127);
        assert_eq!(count('T'), 91);
        assert_eq!(count('Q'), 1);
        assert_eq!(count('Z'), 1);
        // Every letter of the alphabet can be drawn
        assert!(LETTER_FREQUENCIES.iter().all(|(c, _)| count(*c) > 0));
    }

    #[test]
    fn test_letter_pool_size() {
        let expected: usize = LETTER_FREQUENCIES
            .iter()
            .map(|(_, f)| (f * 10.0).round() as usize)
            .sum();
        assert_eq!(LETTER_POOL.len(), expected);
    }
}
