//! Display-name normalization for user records.

/// Connector words kept lowercase unless they open the name.
const LOWERCASE_CONNECTORS: [&str; 7] = ["e", "da", "das", "de", "di", "do", "dos"];

/// Normalize a display name: trim, split on spaces, lowercase each word and
/// capitalize its first letter, except connectors that are not the first
/// word. Idempotent.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.trim()
        .split(' ')
        .enumerate()
        .map(|(index, word)| {
            let lower = word.to_lowercase();
            if index != 0 && LOWERCASE_CONNECTORS.contains(&lower.as_str()) {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_words_and_keeps_connectors() {
        assert_eq!(normalize("maria da silva"), "Maria da Silva");
        assert_eq!(normalize("joão de souza dos santos"), "João de Souza dos Santos");
    }

    #[test]
    fn connector_as_first_word_is_capitalized() {
        assert_eq!(normalize("da costa"), "Da Costa");
    }

    #[test]
    fn idempotent() {
        let once = normalize("joão da silva");
        assert_eq!(once, "João da Silva");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn trims_and_handles_single_word() {
        assert_eq!(normalize("  ANA  "), "Ana");
        assert_eq!(normalize("ana"), "Ana");
    }

    #[test]
    fn uppercase_input_is_folded() {
        assert_eq!(normalize("MARIA DA SILVA"), "Maria da Silva");
    }
}
