//! English surface-form variants for a cleaned answer word.

/// Articles a learner may put in front of a noun.
pub const ARTICLES: &[&str] = &["the", "a", "an"];

/// Expand a word into the plural/singular and article-prefixed forms that
/// count as the same answer.
///
/// Duplicates are possible ("s" yields "" twice via different rules) and
/// harmless, since callers only test membership.
pub fn variants(word: &str) -> Vec<String> {
    let mut forms = vec![
        word.to_string(),
        format!("{word}s"),
        format!("{word}es"),
    ];

    if let Some(stem) = word.strip_suffix('y') {
        forms.push(format!("{stem}ies"));
    }
    if let Some(stem) = word.strip_suffix('s') {
        forms.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("es") {
        forms.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ies") {
        forms.push(format!("{stem}y"));
    }

    forms.extend(ARTICLES.iter().map(|article| format!("{article} {word}")));
    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(forms: &[String], form: &str) -> bool {
        forms.iter().any(|f| f == form)
    }

    #[test]
    fn adds_plurals_and_articles() {
        let forms = variants("house");
        assert!(has(&forms, "house"));
        assert!(has(&forms, "houses"));
        assert!(has(&forms, "housees"));
        assert!(has(&forms, "the house"));
        assert!(has(&forms, "a house"));
        assert!(has(&forms, "an house"));
    }

    #[test]
    fn y_becomes_ies() {
        assert!(has(&variants("city"), "cities"));
    }

    #[test]
    fn strips_plural_endings() {
        let forms = variants("boxes");
        assert!(has(&forms, "boxe"));
        assert!(has(&forms, "box"));

        assert!(has(&variants("cities"), "city"));
        assert!(has(&variants("dogs"), "dog"));
    }

    #[test]
    fn word_without_special_endings_has_six_forms() {
        assert_eq!(variants("dog").len(), 6);
    }
}
