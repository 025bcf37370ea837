//! Scoring weights.

use folio_config::SearchSettings;

/// Default weight of a whole-word token match in a page title.
pub const DEFAULT_TITLE_WEIGHT: u32 = 10;
/// Default weight of a whole-word token match in a page's tags.
pub const DEFAULT_TAG_WEIGHT: u32 = 6;
/// Default weight of a whole-word token match in a page body.
pub const DEFAULT_BODY_WEIGHT: u32 = 2;
/// Default bonus when a multi-token query appears verbatim in the title.
pub const DEFAULT_TITLE_PHRASE_BONUS: u32 = 15;
/// Default bonus when a multi-token query appears verbatim in the body.
pub const DEFAULT_BODY_PHRASE_BONUS: u32 = 5;
/// Default weight of a whole-word token match in a section heading.
pub const DEFAULT_HEADING_WEIGHT: u32 = 4;
/// Default weight of a whole-word token match in a section body.
pub const DEFAULT_SECTION_BODY_WEIGHT: u32 = 1;
/// Default bonus when a multi-token query appears verbatim in a section heading.
pub const DEFAULT_HEADING_PHRASE_BONUS: u32 = 6;
/// Default bonus when a multi-token query appears verbatim in a section body.
pub const DEFAULT_SECTION_BODY_PHRASE_BONUS: u32 = 2;
/// Default cap on the per-page boost from matching sections.
pub const DEFAULT_SECTION_BOOST_CAP: u32 = 3;
/// Default minimum token length; shorter query words are dropped.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Weights and limits for the search scorer.
///
/// Title outranks tags, tags outrank body. The phrase bonuses apply only to queries with
/// more than one token, and the body bonus only when the title bonus did not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWeights {
    /// Whole-word match in the title.
    pub title: u32,
    /// Whole-word match in any tag.
    pub tag: u32,
    /// Whole-word match in the body.
    pub body: u32,
    /// Query phrase appears in the title.
    pub title_phrase: u32,
    /// Query phrase appears in the body.
    pub body_phrase: u32,
    /// Whole-word match in a section heading.
    pub heading: u32,
    /// Whole-word match in a section body.
    pub section_body: u32,
    /// Query phrase appears in a section heading.
    pub heading_phrase: u32,
    /// Query phrase appears in a section body.
    pub section_body_phrase: u32,
    /// Maximum boost a page receives from its matching sections.
    pub section_boost_cap: u32,
    /// Query words shorter than this (in characters) are dropped.
    pub min_token_len: usize,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_WEIGHT,
            tag: DEFAULT_TAG_WEIGHT,
            body: DEFAULT_BODY_WEIGHT,
            title_phrase: DEFAULT_TITLE_PHRASE_BONUS,
            body_phrase: DEFAULT_BODY_PHRASE_BONUS,
            heading: DEFAULT_HEADING_WEIGHT,
            section_body: DEFAULT_SECTION_BODY_WEIGHT,
            heading_phrase: DEFAULT_HEADING_PHRASE_BONUS,
            section_body_phrase: DEFAULT_SECTION_BODY_PHRASE_BONUS,
            section_boost_cap: DEFAULT_SECTION_BOOST_CAP,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl From<&SearchSettings> for SearchWeights {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            title: settings.title_weight,
            tag: settings.tag_weight,
            body: settings.body_weight,
            title_phrase: settings.title_phrase_bonus,
            body_phrase: settings.body_phrase_bonus,
            heading: settings.heading_weight,
            section_body: settings.section_body_weight,
            heading_phrase: settings.heading_phrase_bonus,
            section_body_phrase: settings.section_body_phrase_bonus,
            section_boost_cap: settings.section_boost_cap,
            min_token_len: settings.min_token_len,
        }
    }
}
