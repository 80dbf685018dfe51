//! Multi-pattern substring search (Aho-Corasick).
//!
//! The automaton is assembled by [`builder`] with growable containers and then
//! frozen into flat, exactly-sized arrays. The query path below only reads
//! those arrays: no allocation per input string or per byte.
//!
//! Matching works on UTF-8 bytes. Occurrence offsets are byte offsets and the
//! end offset is inclusive (`"his"` in `"ahishers"` is reported as `1..=3`).

mod builder;
mod graphviz;

use builder::AutomatonBuilder;
use std::ops::Range;

pub(crate) const ROOT: u32 = 0;
pub(crate) const FAIL: u32 = u32::MAX;

/// A compiled, immutable set of blacklisted substrings.
///
/// Built once from a pattern set, then shared read-only between threads
/// (it is replaced wholesale, never mutated).
pub struct PatternMatcher {
    /// byte → alphabet symbol; bytes absent from every pattern map to the
    /// reserved symbol `alphabet.len()`.
    symbols: [u16; 256],
    /// Sorted distinct bytes appearing across the patterns.
    alphabet: Box<[u8]>,
    /// Row width of `goto`: one column per alphabet symbol plus the reserved one.
    stride: usize,
    /// `goto[state * stride + symbol]` → next state, or `FAIL`.
    goto: Box<[u32]>,
    /// Failure link per state.
    fail: Box<[u32]>,
    /// `outputs[output_ranges[s]..output_ranges[s + 1]]` are the pattern ids
    /// recognised on reaching state `s`.
    output_ranges: Box<[u32]>,
    outputs: Box<[u32]>,
    patterns: Box<[Box<str>]>,
}

/// One pattern occurrence. Offsets are byte offsets, `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match<'p> {
    pub start: usize,
    pub end: usize,
    pub pattern: &'p str,
}

impl PatternMatcher {
    /// Compile an automaton from `patterns`.
    ///
    /// Empty strings are ignored and duplicates are collapsed. An empty
    /// pattern set yields a matcher that never reports a match.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AutomatonBuilder::new(patterns).build()
    }

    /// Returns true if any pattern occurs in `text`.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        let mut state = ROOT;
        for &byte in text.as_bytes() {
            state = self.next_state(state, byte);
            if !self.output_range(state).is_empty() {
                return true;
            }
        }
        false
    }

    /// Iterate over every occurrence (overlapping ones included), ordered by
    /// end offset, scanning left to right.
    pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> Matches<'m, 't> {
        Matches {
            matcher: self,
            text: text.as_bytes(),
            pos: 0,
            state: ROOT,
            pending: 0..0,
        }
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.as_ref())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn state_count(&self) -> usize {
        self.fail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[inline]
    fn symbol(&self, byte: u8) -> usize {
        self.symbols[byte as usize] as usize
    }

    #[inline]
    fn transition(&self, state: u32, symbol: usize) -> u32 {
        self.goto[state as usize * self.stride + symbol]
    }

    /// Follow failure links until a transition for `byte` exists, then take it.
    /// Terminates because the root has a transition for every symbol.
    #[inline]
    fn next_state(&self, mut state: u32, byte: u8) -> u32 {
        let symbol = self.symbol(byte);
        loop {
            let next = self.transition(state, symbol);
            if next != FAIL {
                return next;
            }
            state = self.fail[state as usize];
        }
    }

    #[inline]
    fn output_range(&self, state: u32) -> Range<usize> {
        let s = state as usize;
        self.output_ranges[s] as usize..self.output_ranges[s + 1] as usize
    }
}

impl std::fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternMatcher")
            .field("patterns", &self.patterns.len())
            .field("states", &self.fail.len())
            .field("alphabet", &self.alphabet.len())
            .finish()
    }
}

/// Iterator returned by [`PatternMatcher::find_iter`].
pub struct Matches<'m, 't> {
    matcher: &'m PatternMatcher,
    text: &'t [u8],
    /// Next byte to consume.
    pos: usize,
    state: u32,
    /// Outputs of `state` not yet yielded.
    pending: Range<usize>,
}

impl<'m> Iterator for Matches<'m, '_> {
    type Item = Match<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = self.matcher;
        loop {
            if let Some(i) = self.pending.next() {
                let id = matcher.outputs[i] as usize;
                let pattern: &'m str = &matcher.patterns[id];
                let end = self.pos - 1;
                return Some(Match {
                    start: end + 1 - pattern.len(),
                    end,
                    pattern,
                });
            }

            let &byte = self.text.get(self.pos)?;
            self.state = matcher.next_state(self.state, byte);
            self.pos += 1;
            self.pending = matcher.output_range(self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force<'p>(patterns: &'p [&'p str], text: &str) -> Vec<(usize, usize, &'p str)> {
        let bytes = text.as_bytes();
        let mut found = Vec::new();
        for &p in patterns {
            let pb = p.as_bytes();
            if pb.is_empty() || pb.len() > bytes.len() {
                continue;
            }
            for start in 0..=bytes.len() - pb.len() {
                if &bytes[start..start + pb.len()] == pb {
                    found.push((start, start + pb.len() - 1, p));
                }
            }
        }
        found.sort();
        found.dedup();
        found
    }

    fn occurrences<'p>(matcher: &'p PatternMatcher, text: &str) -> Vec<(usize, usize, &'p str)> {
        let mut found: Vec<_> = matcher
            .find_iter(text)
            .map(|m| (m.start, m.end, m.pattern))
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_classic_overlapping_patterns() {
        let patterns = ["he", "she", "his", "hers"];
        let matcher = PatternMatcher::new(patterns);

        let found = occurrences(&matcher, "ahishers");

        assert_eq!(
            found,
            vec![(1, 3, "his"), (3, 5, "she"), (4, 5, "he"), (4, 7, "hers")]
        );
        assert_eq!(found, brute_force(&patterns, "ahishers"));
    }

    #[test]
    fn test_find_iter_is_ordered_by_end_offset() {
        let matcher = PatternMatcher::new(["he", "she", "his", "hers"]);

        let ends: Vec<usize> = matcher.find_iter("ahishers").map(|m| m.end).collect();

        let mut sorted = ends.clone();
        sorted.sort();
        assert_eq!(ends, sorted);
    }

    #[test]
    fn test_is_match_user_agents() {
        let matcher = PatternMatcher::new(["curl", "python-requests", "Googlebot"]);

        assert!(matcher.is_match("curl/7.68.0"));
        assert!(matcher.is_match("Mozilla/5.0 (compatible; Googlebot/2.1)"));
        assert!(matcher.is_match("python-requests/2.31"));
        assert!(!matcher.is_match("Mozilla/5.0 (X11; Linux x86_64) Firefox/120.0"));
        assert!(!matcher.is_match("cur"));
    }

    #[test]
    fn test_empty_pattern_set_never_matches() {
        let matcher = PatternMatcher::new(Vec::<String>::new());

        assert!(matcher.is_empty());
        assert_eq!(matcher.state_count(), 1);
        assert!(!matcher.is_match("anything at all"));
        assert!(!matcher.is_match(""));
        assert_eq!(matcher.find_iter("anything").count(), 0);
    }

    #[test]
    fn test_empty_text_never_matches() {
        let matcher = PatternMatcher::new(["a"]);

        assert!(!matcher.is_match(""));
        assert_eq!(matcher.find_iter("").count(), 0);
    }

    #[test]
    fn test_empty_and_duplicate_patterns_are_dropped() {
        let matcher = PatternMatcher::new(["", "bot", "bot", ""]);

        assert_eq!(matcher.pattern_count(), 1);
        assert_eq!(matcher.find_iter("robot").count(), 1);
        assert!(!matcher.is_match("plain browser"));
    }

    #[test]
    fn test_state_count_shares_prefixes() {
        // root, h-e, s-h-e, (h)-i-s, (h-e)-r-s
        let matcher = PatternMatcher::new(["he", "she", "his", "hers"]);

        assert_eq!(matcher.state_count(), 10);
    }

    #[test]
    fn test_bytes_outside_alphabet_reset_to_root() {
        let matcher = PatternMatcher::new(["abc"]);

        assert!(!matcher.is_match("ab-c"));
        assert!(!matcher.is_match("a b c"));
        assert!(matcher.is_match("ab-abc"));
    }

    #[test]
    fn test_multibyte_patterns() {
        let matcher = PatternMatcher::new(["über", "ö"]);

        assert!(matcher.is_match("Agent-über/1.0"));
        assert!(matcher.is_match("Köln"));
        assert!(!matcher.is_match("uber"));

        let found = occurrences(&matcher, "Köln");
        assert_eq!(found, vec![(1, 2, "ö")]);
    }

    #[test]
    fn test_pattern_nested_inside_another() {
        let matcher = PatternMatcher::new(["abcd", "bc"]);

        let found = occurrences(&matcher, "xabcdx");

        assert_eq!(found, vec![(1, 4, "abcd"), (2, 3, "bc")]);
    }

    #[test]
    fn test_repeated_overlapping_occurrences_of_one_pattern() {
        let matcher = PatternMatcher::new(["aa"]);

        let found = occurrences(&matcher, "aaaa");

        assert_eq!(found, vec![(0, 1, "aa"), (1, 2, "aa"), (2, 3, "aa")]);
    }

    fn random_string(rng: &mut fastrand::Rng, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[rng.usize(..alphabet.len())] as char)
            .collect()
    }

    #[test]
    fn test_random_inputs_agree_with_brute_force() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let alphabet = b"abcd";

        for _ in 0..300 {
            let pattern_count = rng.usize(1..6);
            let owned: Vec<String> = (0..pattern_count)
                .map(|_| {
                    let len = rng.usize(1..5);
                    random_string(&mut rng, alphabet, len)
                })
                .collect();
            let patterns: Vec<&str> = owned.iter().map(String::as_str).collect();
            let matcher = PatternMatcher::new(&patterns);

            for _ in 0..20 {
                let len = rng.usize(0..30);
                // 'z' is never part of a pattern and exercises the reserved symbol
                let text = random_string(&mut rng, b"abcdz", len);

                let expected = brute_force(&patterns, &text);
                assert_eq!(
                    matcher.is_match(&text),
                    !expected.is_empty(),
                    "patterns {patterns:?} text {text:?}"
                );
                assert_eq!(
                    occurrences(&matcher, &text),
                    expected,
                    "patterns {patterns:?} text {text:?}"
                );
            }
        }
    }

    #[test]
    fn test_is_match_agrees_with_aho_corasick_crate() {
        let mut rng = fastrand::Rng::with_seed(42);
        let alphabet = b"xyz/.0";

        for _ in 0..100 {
            let owned: Vec<String> = (0..rng.usize(1..8))
                .map(|_| {
                    let len = rng.usize(1..6);
                    random_string(&mut rng, alphabet, len)
                })
                .collect();
            let ours = PatternMatcher::new(&owned);
            let reference = aho_corasick::AhoCorasick::new(&owned).unwrap();

            for _ in 0..20 {
                let len = rng.usize(0..40);
                let text = random_string(&mut rng, b"xyz/.0q", len);
                assert_eq!(ours.is_match(&text), reference.is_match(&text));
            }
        }
    }
}
