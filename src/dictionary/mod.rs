use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::{fs, sync::OnceCell};

use crate::game::WordValidator;

static SHARED: OnceCell<Arc<Dictionary>> = OnceCell::const_new();

pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load dictionary from a file.
    ///
    /// `.json` files hold an array of strings; anything else is read as one
    /// word per line. Words are stored lowercase.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read word list {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dictionary = if is_json {
            let words: Vec<String> = serde_json::from_str(&content)
                .with_context(|| format!("Word list {} is not a JSON array", path.display()))?;
            Self::from_words(words)
        } else {
            Self::from_words(content.lines())
        };

        if dictionary.is_empty() {
            bail!("Word list {} contains no words", path.display());
        }

        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    /// Load once per process. Later calls return the cached dictionary
    /// regardless of `path`.
    pub async fn shared<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        SHARED
            .get_or_try_init(|| async move { Self::load(path).await.map(Arc::new) })
            .await
            .cloned()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        Self { words }
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordValidator for Dictionary {
    fn has(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
