use regex::Regex;

/// Words masked by default. Kept short on purpose; deployments extend it via
/// configuration rather than code.
const DEFAULT_WORDS: &[&str] = &[
    "ass", "asshole", "bastard", "bitch", "crap", "damn", "dick", "fuck", "hell", "piss", "shit",
    "slut", "whore",
];

/// Word-list profanity filter. Matching is case-insensitive on word
/// boundaries; matched words are replaced by asterisks of the same length.
pub struct ProfanityFilter {
    pattern: Regex,
}

impl ProfanityFilter {
    pub fn new() -> Self {
        Self::with_words(DEFAULT_WORDS.iter().copied())
    }

    pub fn with_words<'a>(words: impl Iterator<Item = &'a str>) -> Self {
        let alternatives = words.map(regex::escape).collect::<Vec<_>>().join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives))
            .expect("profanity word list produced an invalid pattern");
        Self { pattern }
    }

    pub fn clean(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &regex::Captures<'_>| {
                "*".repeat(caps[0].chars().count())
            })
            .into_owned()
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new()
    }
}
