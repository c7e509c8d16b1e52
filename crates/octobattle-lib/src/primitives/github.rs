//! Identifier types shared by the popular listings and battle layers

use serde::Serialize;
use std::fmt;

/// Languages offered at startup; `All` is the unfiltered listing
pub const DEFAULT_LANGUAGES: &[&str] = &["All", "JavaScript", "Ruby", "Java", "CSS", "Python"];

const ALL_LANGUAGES: &str = "All";

/// Listing category key
///
/// Compared by exact string value after trimming. Any non-empty name is a
/// valid key; the default set is only what the CLI advertises.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Surrounding whitespace is not part of a language name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self(name.trim().to_string())
    }

    /// The unfiltered category
    pub fn all() -> Self {
        Self(ALL_LANGUAGES.to_string())
    }

    /// The startup enumeration in display order
    pub fn defaults() -> Vec<Self> {
        DEFAULT_LANGUAGES.iter().map(|name| Self::new(*name)).collect()
    }

    pub fn is_all(&self) -> bool {
        self.0 == ALL_LANGUAGES
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// GitHub search qualifier for this category
    pub fn search_qualifier(&self) -> String {
        if self.is_all() {
            "stars:>1".to_string()
        } else {
            format!("stars:>1 language:{}", self.0)
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A GitHub login taking part in a battle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Player(String);

impl Player {
    /// Surrounding whitespace is not part of a login
    pub fn new(login: impl Into<String>) -> Self {
        let login = login.into();
        Self(login.trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Player {
    fn from(login: &str) -> Self {
        Self::new(login)
    }
}

#[cfg(test)]
mod tests {
    include!("github.test.rs");
}
