//! Headline relevance scoring.

use regex::Regex;

use crate::normalize::{fold, normalize, strip_exchange_suffix};

/// Points for each alias found in the title.
pub const ALIAS_POINTS: u32 = 2;
/// Points when the core code appears inside `()`, `（）` or `【】`.
pub const BRACKETED_CODE_POINTS: u32 = 2;
/// Points when the core code appears anywhere in the title.
pub const BARE_CODE_POINTS: u32 = 1;

/// Scores headlines against one ticker's alias set.
///
/// Aliases, the core code and the title are all compared after NFKC and
/// lower-casing, so `（2705）` counts as a bracketed code just like `(2705)`.
pub struct TitleScorer {
    aliases: Vec<String>,
    core: String,
    bracketed: Option<Regex>,
}

impl TitleScorer {
    pub fn new<I, S>(aliases: I, code: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases = aliases
            .into_iter()
            .map(|a| fold(a.as_ref()))
            .filter(|a| !a.is_empty())
            .collect();

        // The suffix is matched case-sensitively, so strip it before folding.
        let core = fold(strip_exchange_suffix(&normalize(code)));
        let bracketed = if core.is_empty() {
            None
        } else {
            let c = regex::escape(&core);
            match Regex::new(&format!(r"\({c}\)|（{c}）|【{c}】")) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Bracketed code pattern for {} not built: {}", core, e);
                    None
                }
            }
        };

        Self {
            aliases,
            core,
            bracketed,
        }
    }

    /// Total score for `title`. Never negative, no upper bound.
    pub fn score(&self, title: &str) -> u32 {
        let title = fold(title);
        let mut score = 0;

        for alias in &self.aliases {
            if title.contains(alias.as_str()) {
                score += ALIAS_POINTS;
            }
        }

        if !self.core.is_empty() {
            if self.bracketed.as_ref().is_some_and(|re| re.is_match(&title)) {
                score += BRACKETED_CODE_POINTS;
            }
            if title.contains(self.core.as_str()) {
                score += BARE_CODE_POINTS;
            }
        }

        score
    }
}

/// One-off scoring of a single title.
pub fn score_title<I, S>(title: &str, aliases: I, code: &str) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TitleScorer::new(aliases, code).score(title)
}
