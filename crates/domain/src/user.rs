use crate::shared::entity::Entity;
use std::fmt::Display;

/// Opaque, stable identifier of a chat user given by the messaging network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of languages the bot can talk in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    Ru,
    En,
    Zh,
    Hi,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::Ru, Locale::En, Locale::Zh, Locale::Hi];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Zh => "zh",
            Self::Hi => "hi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.code() == code)
    }

    /// Unknown codes fall back to the default locale
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Label shown on the language selection button, written in the language itself
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ru => "🇷🇺 Русский",
            Self::En => "🇬🇧 English",
            Self::Zh => "🇨🇳 中文",
            Self::Hi => "🇮🇳 हिन्दी",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::Ru
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub locale: Locale,
}

impl User {
    pub fn new(id: UserId, locale: Locale) -> Self {
        Self { id, locale }
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> UserId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_roundtrip() {
        for locale in Locale::ALL.iter() {
            assert_eq!(Locale::from_code(locale.code()), Some(*locale));
        }
    }

    #[test]
    fn unknown_locale_falls_back_to_default() {
        assert_eq!(Locale::from_code("de"), None);
        assert_eq!(Locale::from_code_or_default("de"), Locale::Ru);
    }
}
