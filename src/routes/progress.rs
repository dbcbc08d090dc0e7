use crate::{
    models::{self, load_selected_theme, Progress, Theme, ThemeError, THEMES},
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    pub progress: Progress,
    pub theme: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ThemeInfo {
    pub name: &'static str,
    pub required_level: u32,
    pub is_unlocked: bool,
}

impl ThemeInfo {
    fn new(theme: &Theme, level: u32) -> Self {
        Self {
            name: theme.name,
            required_level: theme.required_level,
            is_unlocked: theme.is_unlocked(level),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    pub selected: &'static str,
    pub level: u32,
    pub themes: Vec<ThemeInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SelectThemeRequest {
    pub name: String,
}

/// Persisted progression and selected theme
pub async fn get_progress(State(state): State<Arc<AppState>>) -> Json<ProgressResponse> {
    Json(ProgressResponse {
        progress: Progress::load(state.store.as_ref()),
        theme: load_selected_theme(state.store.as_ref()).name,
    })
}

/// All themes with their unlock state at the stored level
pub async fn list_themes(State(state): State<Arc<AppState>>) -> Json<ThemesResponse> {
    let level = Progress::load(state.store.as_ref()).level;

    Json(ThemesResponse {
        selected: load_selected_theme(state.store.as_ref()).name,
        level,
        themes: THEMES.iter().map(|theme| ThemeInfo::new(theme, level)).collect(),
    })
}

pub async fn select_theme(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectThemeRequest>,
) -> Result<Json<ThemeInfo>, StatusCode> {
    let level = Progress::load(state.store.as_ref()).level;

    let theme = models::select_theme(state.store.as_ref(), &request.name, level).map_err(|e| {
        tracing::warn!("Theme selection failed: {}", e);
        match e {
            ThemeError::Unknown(_) => StatusCode::NOT_FOUND,
            ThemeError::Locked { .. } => StatusCode::FORBIDDEN,
            ThemeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    })?;

    Ok(Json(ThemeInfo::new(theme, level)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dictionary::Dictionary,
        store::{KeyValueStore, MemoryStore, LEVEL_KEY},
    };
    use dashmap::DashMap;

    fn test_state(store: Arc<MemoryStore>) -> Arc<AppState> {
        Arc::new(AppState {
            dictionary: Arc::new(Dictionary::from_words(["crane"])),
            store,
            sessions: DashMap::new(),
        })
    }

    #[tokio::test]
    async fn test_list_themes_marks_unlocked() {
        let store = Arc::new(MemoryStore::new());
        store.set(LEVEL_KEY, "3").unwrap();

        let Json(response) = list_themes(State(test_state(store))).await;

        assert_eq!(response.level, 3);
        assert_eq!(response.selected, "Midnight");
        let unlocked: Vec<bool> = response.themes.iter().map(|t| t.is_unlocked).collect();
        assert_eq!(unlocked, vec![true, true, false]);
    }

    #[tokio::test]
    async fn test_select_theme_status_codes() {
        let store = Arc::new(MemoryStore::new());
        let state = test_state(store.clone());

        let locked = select_theme(
            State(state.clone()),
            Json(SelectThemeRequest {
                name: "Forest".to_string(),
            }),
        )
        .await;
        assert_eq!(locked.err(), Some(StatusCode::FORBIDDEN));

        let unknown = select_theme(
            State(state.clone()),
            Json(SelectThemeRequest {
                name: "Neon".to_string(),
            }),
        )
        .await;
        assert_eq!(unknown.err(), Some(StatusCode::NOT_FOUND));

        store.set(LEVEL_KEY, "5").unwrap();
        let Json(theme) = select_theme(
            State(state.clone()),
            Json(SelectThemeRequest {
                name: "Forest".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(theme.name, "Forest");

        let Json(progress) = get_progress(State(state)).await;
        assert_eq!(progress.theme, "Forest");
        assert_eq!(progress.progress.level, 5);
    }
}
