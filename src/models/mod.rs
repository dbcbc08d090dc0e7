pub mod game;
pub mod progress;
pub mod theme;

pub use game::{Bonus, GameState, GameStatus, Grid, PowerUpType, Tile};
pub use progress::Progress;
pub use theme::{load_selected_theme, select_theme, Theme, ThemeError, THEMES};
