//! Keyword search support.
//!
//! Search terms arrive in either Latin or Cyrillic script for the same
//! Uzbek words, so every token is expanded into its transliteration
//! variants and each variant is matched with `contains` against the
//! searchable columns. Digraphs must be replaced before single letters,
//! otherwise "sh" would transliterate as two characters.

use unicode_normalization::UnicodeNormalization;

const LATIN_DIGRAPHS: &[(&str, &str)] = &[
    ("sh", "ш"),
    ("ch", "ч"),
    ("ya", "я"),
    ("yu", "ю"),
    ("yo", "ё"),
    ("o'", "ў"),
    ("g'", "ғ"),
];

const LATIN_SINGLE: &[(&str, &str)] = &[
    ("a", "а"),
    ("b", "б"),
    ("d", "д"),
    ("e", "е"),
    ("f", "ф"),
    ("g", "г"),
    ("h", "ҳ"),
    ("i", "и"),
    ("j", "ж"),
    ("k", "к"),
    ("l", "л"),
    ("m", "м"),
    ("n", "н"),
    ("o", "о"),
    ("p", "п"),
    ("q", "қ"),
    ("r", "р"),
    ("s", "с"),
    ("t", "т"),
    ("u", "у"),
    ("v", "в"),
    ("x", "х"),
    ("y", "й"),
    ("z", "з"),
];

pub fn latin_to_cyrillic(text: &str) -> String {
    let mut out = text.to_lowercase();
    for (latin, cyrillic) in LATIN_DIGRAPHS {
        out = out.replace(latin, cyrillic);
    }
    for (latin, cyrillic) in LATIN_SINGLE {
        out = out.replace(latin, cyrillic);
    }
    out
}

pub fn cyrillic_to_latin(text: &str) -> String {
    let mut out = text.to_lowercase();
    for (latin, cyrillic) in LATIN_DIGRAPHS {
        out = out.replace(cyrillic, latin);
    }
    for (latin, cyrillic) in LATIN_SINGLE {
        out = out.replace(cyrillic, latin);
    }
    out
}

/// Split a query into lowercase NFKC-normalized tokens.
pub fn tokens(query: &str) -> Vec<String> {
    query
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// The token itself plus both transliterations, deduplicated.
pub fn token_variants(token: &str) -> Vec<String> {
    let mut variants = vec![token.to_string()];
    for candidate in [latin_to_cyrillic(token), cyrillic_to_latin(token)] {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digraphs_take_precedence() {
        assert_eq!(latin_to_cyrillic("shahar"), "шаҳар");
        assert_eq!(cyrillic_to_latin("чой"), "choy");
    }

    #[test]
    fn transliterations_are_inverse_for_simple_words() {
        assert_eq!(cyrillic_to_latin(&latin_to_cyrillic("kitob")), "kitob");
    }

    #[test]
    fn tokens_normalize_and_split() {
        assert_eq!(tokens("  Kitob   Дунёси "), vec!["kitob", "дунёси"]);
    }

    #[test]
    fn variants_are_deduplicated() {
        let variants = token_variants("kitob");
        assert_eq!(variants.len(), 2);
        assert!(variants.contains(&"kitob".to_string()));
        assert!(variants.contains(&"китоб".to_string()));
    }
}
