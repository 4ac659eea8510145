//! User-facing text lookup.
//!
//! The presenter only ever shows a handful of messages. Hosts plug in their own
//! localization by implementing [`StringResources`].

/// Messages the presenter can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKey {
    /// Price source unreachable
    ErrorInternetConnection,
    /// Any other conversion failure
    ErrorGeneric,
    /// Inline text for a preview entry that failed to load
    PreviewRetry,
}

/// Lookup of localized text by key.
pub trait StringResources: Send + Sync {
    fn get_string(&self, key: StringKey) -> String;
}

/// Built-in English strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishStrings;

impl StringResources for EnglishStrings {
    fn get_string(&self, key: StringKey) -> String {
        match key {
            StringKey::ErrorInternetConnection => {
                "No internet connection. Please check your network and try again."
            }
            StringKey::ErrorGeneric => "Something went wrong. Please try again.",
            StringKey::PreviewRetry => "Couldn't load price. Try again.",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_text() {
        let strings = EnglishStrings;
        for key in [
            StringKey::ErrorInternetConnection,
            StringKey::ErrorGeneric,
            StringKey::PreviewRetry,
        ] {
            assert!(!strings.get_string(key).is_empty(), "{key:?} is empty");
        }
    }
}
