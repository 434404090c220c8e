//! Transcript cleanup before answer comparison.
//!
//! Speech recognizers hand back whatever the learner said around the answer:
//! "well I think the answer is the dog." This module reduces that to "dog".

/// Characters removed anywhere in the transcript.
pub const PUNCTUATION: &[char] = &['.', '!', '?', ',', ';', ':', '\'', '"', '(', ')'];

/// Leading phrases stripped from a transcript.
///
/// Order matters: the first entry that prefixes the text wins, so longer
/// phrases must come before any shorter phrase they start with ("i think the
/// answer is " before "i think it is "). Entries are written without
/// apostrophes because punctuation is removed first.
pub const FILLER_PHRASES: &[&str] = &[
    "the answer is ",
    "the word is ",
    "my answer is ",
    "i think the answer is ",
    "i think the word is ",
    "i think it is ",
    "i think its ",
    "i believe it is ",
    "i believe its ",
    "i believe the answer is ",
    "i say ",
    "i said ",
    "it is ",
    "its ",
    "that is ",
    "thats ",
    "that would be ",
    "the translation is ",
    "it means ",
    "this means ",
    "it should be ",
    "i would say ",
    "my guess is ",
    "i guess its ",
    "i guess ",
    "okay ",
    "ok ",
    "well ",
    "so ",
    "hmm ",
    "um ",
    "uh ",
    "the ",
    "a ",
    "an ",
];

/// Phrases a learner says to hear the prompt again.
pub const REPEAT_PHRASES: &[&str] = &[
    "repeat",
    "please repeat",
    "repeat please",
    "repeat word",
    "say again",
    "say it again",
    "again",
    "one more time",
    "repeat that",
    "can you repeat",
    "could you repeat",
    "say that again",
    "come again",
    "pardon",
    "replay",
];

/// Lowercase, drop punctuation, and peel leading filler phrases.
///
/// Stripping loops until no phrase matches, so stacked fillers collapse:
/// "well i think the answer is the hund" becomes "hund".
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered.chars().filter(|c| !PUNCTUATION.contains(c)).collect();

    let mut rest = cleaned.trim_start();
    while let Some(stripped) = FILLER_PHRASES
        .iter()
        .find_map(|phrase| rest.strip_prefix(*phrase))
    {
        rest = stripped.trim_start();
    }

    rest.trim_end().to_string()
}

/// Whether a transcript asks to repeat the prompt instead of answering.
pub fn is_repeat_command(text: &str) -> bool {
    let cleaned = text.trim().to_lowercase();
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    REPEAT_PHRASES.iter().any(|phrase| *phrase == cleaned)
}
