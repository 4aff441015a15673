//! English inflection used for resource plurals and template helpers.

/// Turns a singular noun into its plural form.
///
/// Injected into resource validation and the template engine so both agree
/// on the same plural for a kind.
pub trait Pluralizer: Send + Sync {
    fn pluralize(&self, word: &str) -> String;
}

/// Rule-based English pluralizer.
///
/// Covers the cases Kubernetes kinds actually hit: irregular nouns,
/// uncountables, sibilant endings and consonant + `y`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishPluralizer;

const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

impl Pluralizer for EnglishPluralizer {
    fn pluralize(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        let lower = word.to_lowercase();

        if UNCOUNTABLE.contains(&lower.as_str()) {
            return word.to_string();
        }

        if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == lower) {
            return match_leading_case(word, plural);
        }

        if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
            return format!("{word}es");
        }

        if let Some(stem) = word.strip_suffix('y').or_else(|| word.strip_suffix('Y')) {
            let preceded_by_consonant = stem
                .chars()
                .last()
                .is_some_and(|c| !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
            if preceded_by_consonant {
                return format!("{stem}ies");
            }
        }

        format!("{word}s")
    }
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        title(replacement)
    } else {
        replacement.to_string()
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
