//! Fuzzy player-name matching against a gameweek statistics catalog.
//!
//! Fantasy squads and third-party statistics spell names differently
//! (accents, transliterations, middle names). Matching goes through the
//! [`NameMatcher`] trait so the similarity measure can be swapped or faked
//! in tests.

use std::collections::HashSet;

/// Best candidate for a queried name, with similarity in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch<'a> {
    pub candidate: &'a str,
    pub score: f64,
}

pub trait NameMatcher {
    fn best_match<'a>(&self, name: &str, candidates: &'a [String]) -> Option<NameMatch<'a>>;
}

/// Case-insensitive normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMatcher;

impl NameMatcher for LevenshteinMatcher {
    fn best_match<'a>(&self, name: &str, candidates: &'a [String]) -> Option<NameMatch<'a>> {
        let query = name.trim().to_lowercase();
        let mut best: Option<NameMatch<'a>> = None;
        for candidate in candidates {
            let score = strsim::normalized_levenshtein(&query, &candidate.trim().to_lowercase());
            // Strictly greater keeps the first candidate on ties
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(NameMatch {
                    candidate: candidate.as_str(),
                    score,
                });
            }
        }
        best
    }
}

/// Distinct stat-player names for one gameweek, queried through a matcher.
pub struct NameIndex<M: NameMatcher> {
    names: Vec<String>,
    matcher: M,
}

impl<M: NameMatcher> NameIndex<M> {
    pub fn new<I, S>(names: I, matcher: M) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| seen.insert(n.clone()))
            .collect();
        Self { names, matcher }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn best_match(&self, name: &str) -> Option<NameMatch<'_>> {
        self.matcher.best_match(name, &self.names)
    }
}

/// Case-insensitive literal substring test used to confirm a name match by club.
///
/// The club is never interpreted as a pattern, so names such as
/// `"A.S. FAR (Rabat)"` match only themselves.
pub fn team_matches_club(team_name: &str, club: &str) -> bool {
    team_name.to_lowercase().contains(&club.to_lowercase())
}
