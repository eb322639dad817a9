use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "en-US",
        // Chat clients render the Unicode isolation marks as junk.
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Default language identifier used as a fallback.
static DEFAULT_LANG: Lazy<LanguageIdentifier> = Lazy::new(|| "en-US".parse().unwrap_or_default());

/// Normalizes a language code into a LanguageIdentifier (falls back to default).
pub fn lang_from_code(code: &str) -> LanguageIdentifier {
    let code_normalized = code.to_lowercase();
    let normalized = match code_normalized.as_str() {
        "en" | "en-us" => "en-US",
        "nb" | "nb-no" | "no" => "nb",
        "nn" | "nn-no" => "nn",
        other => other,
    };

    normalized.parse().unwrap_or_else(|_| DEFAULT_LANG.clone())
}

/// Returns a localized string for the given key.
pub fn t(lang: &LanguageIdentifier, key: &str) -> String {
    LOCALES
        .lookup(lang, key)
        .unwrap_or_else(|| LOCALES.lookup(&DEFAULT_LANG, key).unwrap_or_else(|| key.to_string()))
}

/// Returns a localized string with arguments for interpolation.
pub fn t_args(lang: &LanguageIdentifier, key: &str, args: &FluentArgs) -> String {
    let args_map: HashMap<String, FluentValue> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    LOCALES.lookup_with_args(lang, key, &args_map).unwrap_or_else(|| {
        LOCALES
            .lookup_with_args(&DEFAULT_LANG, key, &args_map)
            .unwrap_or_else(|| key.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_known_translation() {
        let nb = lang_from_code("nb");
        let nn = lang_from_code("nn");

        assert_eq!(t(&nb, "coffee-not-made"), "Kaffen har ikke blitt satt på");
        assert_eq!(t(&nn, "coffee-not-made"), "Kaffien har ikkje blitt satt på");
    }

    #[test]
    fn interpolates_without_isolation_marks() {
        let nb = lang_from_code("nb");
        let mut args = FluentArgs::new();
        args.set("count", 3);

        assert_eq!(t_args(&nb, "time-hours", &args), "3 timer");
    }

    #[test]
    fn unknown_key_returns_key() {
        let en = lang_from_code("en");
        assert_eq!(t(&en, "no-such-key"), "no-such-key");
    }

    #[test]
    fn test_lang_from_code() {
        assert_eq!(lang_from_code("EN").to_string(), "en-US");
        assert_eq!(lang_from_code("nb-NO").to_string(), "nb");
        assert_eq!(lang_from_code("nn").to_string(), "nn");
        assert_eq!(lang_from_code("not a language").to_string(), "en-US");
    }
}
