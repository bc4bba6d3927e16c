use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Linking particles dropped from names before building a login.
static PARTICLES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["de", "da", "do", "dos", "das", "e"].into_iter().collect());

/// Suggests a PPPoE login from a customer's full name.
///
/// `"Maria Eduarda Costa Lima"` becomes `mariacl`: the first word, then the
/// initials of the second-to-last and last words. Two words give the first
/// word plus the second initial, a single word is used as is. Returns an empty
/// string when nothing is left after dropping particles.
pub fn derive_login(full_name: &str) -> String {
    let folded: String = full_name
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect();
    let words: Vec<&str> = folded
        .split_whitespace()
        .filter(|word| !PARTICLES.contains(*word))
        .collect();

    match words.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first}{}", initial(second)),
        [first, .., penultimate, last] => {
            format!("{first}{}{}", initial(penultimate), initial(last))
        }
    }
}

fn initial(word: &str) -> String {
    word.chars().next().map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_words_after_particles() {
        assert_eq!(derive_login("João da Silva"), "joaos");
    }

    #[test]
    fn long_names_use_last_two_initials() {
        assert_eq!(derive_login("Maria Eduarda Costa Lima"), "mariacl");
        assert_eq!(derive_login("Ana Paula dos Santos e Souza"), "anass");
    }

    #[test]
    fn single_name_is_kept() {
        assert_eq!(derive_login("Pedro"), "pedro");
        assert_eq!(derive_login("  Pedro  "), "pedro");
    }

    #[test]
    fn diacritics_are_stripped() {
        assert_eq!(derive_login("Íris Conceição"), "irisc");
        assert_eq!(derive_login("Ângela Müller Araújo"), "angelama");
    }

    #[test]
    fn particles_only_give_empty_login() {
        assert_eq!(derive_login(""), "");
        assert_eq!(derive_login("de da do"), "");
    }
}
