use std::env;

pub use rust_i18n::t;

const LOCALES: [&str; 2] = ["en", "ko"];

/// Picks the UI locale from the flag, then `LANG`, then English.
pub fn init_locale(preferred: Option<&str>) -> String {
    let locale = preferred
        .map(str::to_string)
        .or_else(|| env::var("LANG").ok())
        .and_then(|l| supported(&l))
        .unwrap_or_else(|| "en".to_string());
    rust_i18n::set_locale(&locale);
    locale
}

fn supported(locale: &str) -> Option<String> {
    let lang = locale
        .split(['_', '-', '.'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    LOCALES
        .iter()
        .find(|l| **l == lang)
        .map(|l| l.to_string())
}
