//! Query tokenization and word-boundary matching.

/// A tokenized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Lowercased tokens, in query order, at least `min_token_len` characters each.
    pub tokens: Vec<String>,
    /// The whole lowercased query with runs of whitespace collapsed. Only set when there
    /// is more than one token.
    pub phrase: Option<String>,
}

impl Query {
    /// Tokenizes a raw query.
    ///
    /// Returns `None` if the trimmed query is empty. A non-empty query whose words are all
    /// too short yields a query with no tokens.
    pub fn parse(input: &str, min_token_len: usize) -> Option<Self> {
        let lowered = input.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        let tokens: Vec<String> = lowered
            .split_whitespace()
            .filter(|word| word.chars().count() >= min_token_len)
            .map(str::to_string)
            .collect();

        let phrase = (tokens.len() > 1)
            .then(|| lowered.split_whitespace().collect::<Vec<_>>().join(" "));

        Some(Self { tokens, phrase })
    }

    /// Returns true if every token occurs as a substring of `text`.
    pub fn prefilter(&self, text: &str) -> bool {
        self.tokens.iter().all(|token| text.contains(token.as_str()))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true if `word` occurs in `text` delimited by non-word characters or the ends.
///
/// Both arguments are expected to be lowercased already.
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, matched)| {
        let end = start + matched.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
