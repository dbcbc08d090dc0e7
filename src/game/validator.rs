use std::collections::HashSet;

/// Dictionary membership oracle. Callers pass lowercase words.
pub trait WordValidator: Send + Sync {
    fn has(&self, word: &str) -> bool;
}

impl WordValidator for HashSet<String> {
    fn has(&self, word: &str) -> bool {
        self.contains(word)
    }
}
