use rand::{seq::SliceRandom, Rng};

use crate::{
    models::{Grid, Tile},
    utils::letters::{is_vowel, LETTER_POOL, VOWELS},
};

/// Width and height of the board
pub const GRID_SIZE: usize = 5;
/// Every generated grid carries at least this many vowels
pub const MIN_VOWELS: usize = 7;

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a new 5x5 grid with weighted letter distribution
    pub fn generate(rng: &mut impl Rng) -> Grid {
        let mut grid: Grid = (0..GRID_SIZE)
            .map(|row| {
                (0..GRID_SIZE)
                    .map(|col| Tile::new(row, col, Self::random_letter(rng)))
                    .collect()
            })
            .collect();

        Self::ensure_min_vowels(&mut grid, rng);

        grid
    }

    fn random_letter(rng: &mut impl Rng) -> char {
        LETTER_POOL[rng.random_range(0..LETTER_POOL.len())]
    }

    /// Replace random consonants with random vowels until the minimum is met.
    /// Terminates because the grid has more cells than MIN_VOWELS.
    fn ensure_min_vowels(grid: &mut Grid, rng: &mut impl Rng) {
        let mut vowel_count = Self::vowel_count(grid);

        while vowel_count < MIN_VOWELS {
            let row = rng.random_range(0..GRID_SIZE);
            let col = rng.random_range(0..GRID_SIZE);
            let tile = &mut grid[row][col];
            if !is_vowel(tile.letter) {
                tile.letter = VOWELS[rng.random_range(0..VOWELS.len())];
                vowel_count += 1;
            }
        }
    }

    pub fn vowel_count(grid: &Grid) -> usize {
        grid.iter()
            .flatten()
            .filter(|tile| is_vowel(tile.letter))
            .count()
    }

    /// Permute the letters of `grid` (Fisher-Yates). Tile ids and positions
    /// are kept; only letters move.
    pub fn shuffle(grid: &Grid, rng: &mut impl Rng) -> Grid {
        let mut letters: Vec<char> = grid.iter().flatten().map(|tile| tile.letter).collect();
        letters.shuffle(rng);

        let mut letters = letters.into_iter();
        grid.iter()
            .map(|row| {
                row.iter()
                    .map(|tile| Tile {
                        letter: letters.next().unwrap_or(tile.letter),
                        ..tile.clone()
                    })
                    .collect()
            })
            .collect()
    }

    /// Check if two tiles are adjacent (including diagonals)
    pub fn are_adjacent(a: &Tile, b: &Tile) -> bool {
        let row_diff = a.row.abs_diff(b.row);
        let col_diff = a.col.abs_diff(b.col);

        row_diff <= 1 && col_diff <= 1 && (row_diff + col_diff > 0)
    }
}
