use foia_api_types::Agency;
use itertools::Itertools;

/// Splits on whitespace and lower-cases, dropping empty tokens.
pub fn whitespace_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// The tokens an agency can be found by: its name words, then its
/// abbreviation words.
pub fn agency_tokens(agency: &Agency) -> Vec<String> {
    whitespace_tokens(&agency.name)
        .into_iter()
        .chain(
            agency
                .abbreviation
                .as_deref()
                .map(whitespace_tokens)
                .unwrap_or_default(),
        )
        .collect()
}

/// In-memory search index over the prefetched directory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgencyIndex {
    entries: Vec<(Agency, Vec<String>)>,
    limit: usize,
}

impl AgencyIndex {
    pub fn new(agencies: Vec<Agency>, limit: usize) -> Self {
        let entries = agencies
            .into_iter()
            .unique_by(|agency| agency.slug.clone())
            .map(|agency| {
                let tokens = agency_tokens(&agency);
                (agency, tokens)
            })
            .collect();
        Self { entries, limit }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Agencies where every query token prefixes one of the agency's tokens,
    /// in directory order, at most `limit` of them.
    pub fn search(&self, query: &str) -> Vec<&Agency> {
        let query_tokens = whitespace_tokens(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|(_, tokens)| {
                query_tokens
                    .iter()
                    .all(|q| tokens.iter().any(|t| t.starts_with(q.as_str())))
            })
            .map(|(agency, _)| agency)
            .take(self.limit)
            .collect()
    }
}

/// A run of display text, flagged when it matched part of the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Splits `text` into plain and matched segments. Every case-insensitive
/// occurrence of any query token is matched; at a given position the
/// earliest token in the query wins.
pub fn highlight_segments(text: &str, query: &str) -> Vec<Segment> {
    let tokens: Vec<Vec<char>> = query
        .split_whitespace()
        .map(|t| t.chars().collect())
        .collect();
    let chars: Vec<char> = text.chars().collect();
    let mut segments: Vec<Segment> = Vec::new();
    let mut push = |piece: &[char], matched: bool| {
        if piece.is_empty() {
            return;
        }
        match segments.last_mut() {
            Some(last) if last.matched == matched => last.text.extend(piece),
            _ => segments.push(Segment {
                text: piece.iter().collect(),
                matched,
            }),
        }
    };

    let mut plain_start = 0;
    let mut i = 0;
    while i < chars.len() {
        let hit = tokens.iter().find(|token| {
            i + token.len() <= chars.len()
                && token
                    .iter()
                    .zip(&chars[i..])
                    .all(|(a, b)| chars_eq_ignore_case(*a, *b))
        });
        match hit {
            Some(token) => {
                push(&chars[plain_start..i], false);
                push(&chars[i..i + token.len()], true);
                i += token.len();
                plain_start = i;
            }
            None => i += 1,
        }
    }
    push(&chars[plain_start..], false);
    segments
}
