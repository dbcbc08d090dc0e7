use serde::Serialize;
use thiserror::Error;

use crate::store::{KeyValueStore, StoreError, THEME_KEY};

/// A color theme that unlocks at a player level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub required_level: u32,
}

impl Theme {
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= self.required_level
    }
}

/// All themes, in display order. The first one is the default.
pub static THEMES: [Theme; 3] = [
    Theme {
        name: "Midnight",
        required_level: 1,
    },
    Theme {
        name: "Crimson",
        required_level: 3,
    },
    Theme {
        name: "Forest",
        required_level: 5,
    },
];

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme '{0}'")]
    Unknown(String),
    #[error("theme '{name}' unlocks at level {required_level}")]
    Locked { name: String, required_level: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn find_theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name == name)
}

/// The stored theme, or the default when nothing (or an unknown name) is stored
pub fn load_selected_theme(store: &dyn KeyValueStore) -> &'static Theme {
    store
        .get(THEME_KEY)
        .and_then(|name| find_theme(&name))
        .unwrap_or(&THEMES[0])
}

/// Persist `name` as the selected theme if the player has unlocked it
pub fn select_theme(
    store: &dyn KeyValueStore,
    name: &str,
    level: u32,
) -> Result<&'static Theme, ThemeError> {
    let theme = find_theme(name).ok_or_else(|| ThemeError::Unknown(name.to_string()))?;
    if !theme.is_unlocked(level) {
        return Err(ThemeError::Locked {
            name: theme.name.to_string(),
            required_level: theme.required_level,
        });
    }

    store.set(THEME_KEY, theme.name)?;
    tracing::info!("Selected theme {}", theme.name);
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_unlock_levels() {
        let [midnight, crimson, forest] = THEMES;
        assert!(midnight.is_unlocked(1));
        assert!(!crimson.is_unlocked(2));
        assert!(crimson.is_unlocked(3));
        assert!(!forest.is_unlocked(4));
        assert!(forest.is_unlocked(9));
    }

    #[test]
    fn test_default_theme_for_unknown_name() {
        let store = MemoryStore::new();
        assert_eq!(load_selected_theme(&store).name, "Midnight");

        store.set(THEME_KEY, "Neon").unwrap();
        assert_eq!(load_selected_theme(&store).name, "Midnight");
    }

    #[test]
    fn test_select_theme() {
        let store = MemoryStore::new();

        assert!(matches!(
            select_theme(&store, "Forest", 4),
            Err(ThemeError::Locked { required_level: 5, .. })
        ));
        assert!(matches!(
            select_theme(&store, "Neon", 10),
            Err(ThemeError::Unknown(_))
        ));
        assert_eq!(load_selected_theme(&store).name, "Midnight");

        let theme = select_theme(&store, "Crimson", 3).unwrap();
        assert_eq!(theme.name, "Crimson");
        assert_eq!(load_selected_theme(&store).name, "Crimson");
    }
}
