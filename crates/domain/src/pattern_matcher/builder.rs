use super::{PatternMatcher, FAIL, ROOT};
use std::collections::{HashSet, VecDeque};

/// Construction-time representation of the automaton.
///
/// Uses growable containers; [`AutomatonBuilder::build`] freezes them into the
/// flat arrays read by the query path.
pub(super) struct AutomatonBuilder {
    patterns: Vec<Box<str>>,
    alphabet: Vec<u8>,
    symbols: [u16; 256],
    stride: usize,
    goto: Vec<u32>,
    fail: Vec<u32>,
    outputs: Vec<Vec<u32>>,
}

impl AutomatonBuilder {
    pub(super) fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let patterns: Vec<Box<str>> = patterns
            .into_iter()
            .filter_map(|p| {
                let p = p.as_ref();
                (!p.is_empty() && seen.insert(p.to_owned())).then(|| Box::from(p))
            })
            .collect();

        let mut alphabet: Vec<u8> = patterns
            .iter()
            .flat_map(|p| p.bytes())
            .collect::<HashSet<u8>>()
            .into_iter()
            .collect();
        alphabet.sort_unstable();

        let absent = alphabet.len() as u16;
        let mut symbols = [absent; 256];
        for (i, &byte) in alphabet.iter().enumerate() {
            symbols[byte as usize] = i as u16;
        }

        let stride = alphabet.len() + 1;
        let max_states = 1 + patterns.iter().map(|p| p.len()).sum::<usize>();

        let mut builder = Self {
            patterns,
            alphabet,
            symbols,
            stride,
            goto: Vec::with_capacity(max_states * stride),
            fail: Vec::with_capacity(max_states),
            outputs: Vec::with_capacity(max_states),
        };
        builder.add_state();
        builder
    }

    pub(super) fn build(mut self) -> PatternMatcher {
        self.build_trie();
        self.make_root_total();
        self.compute_failure_links();
        self.freeze()
    }

    fn add_state(&mut self) -> u32 {
        let id = self.fail.len() as u32;
        self.goto.resize(self.goto.len() + self.stride, FAIL);
        self.fail.push(FAIL);
        self.outputs.push(Vec::new());
        id
    }

    #[inline]
    fn slot(&self, state: u32, symbol: usize) -> usize {
        state as usize * self.stride + symbol
    }

    fn build_trie(&mut self) {
        for id in 0..self.patterns.len() {
            let bytes = self.patterns[id].as_bytes().to_vec();
            let mut state = ROOT;
            let mut i = 0;

            // walk the part of the pattern already present
            while i < bytes.len() {
                let next = self.goto[self.slot(state, self.symbols[bytes[i] as usize] as usize)];
                if next == FAIL {
                    break;
                }
                state = next;
                i += 1;
            }

            for &byte in &bytes[i..] {
                let next = self.add_state();
                let slot = self.slot(state, self.symbols[byte as usize] as usize);
                self.goto[slot] = next;
                state = next;
            }

            self.outputs[state as usize].push(id as u32);
        }
    }

    /// Every symbol without an explicit root transition loops back to the root,
    /// so the failure walk always terminates there.
    fn make_root_total(&mut self) {
        for target in &mut self.goto[..self.stride] {
            if *target == FAIL {
                *target = ROOT;
            }
        }
        self.fail[ROOT as usize] = ROOT;
    }

    fn compute_failure_links(&mut self) {
        let mut queue = VecDeque::new();

        for symbol in 0..self.stride {
            let depth_one = self.goto[symbol];
            if depth_one != ROOT {
                self.fail[depth_one as usize] = ROOT;
                queue.push_back(depth_one);
            }
        }

        while let Some(current) = queue.pop_front() {
            for symbol in 0..self.stride {
                let child = self.goto[self.slot(current, symbol)];
                if child == FAIL {
                    continue;
                }
                queue.push_back(child);

                let mut state = self.fail[current as usize];
                while self.goto[self.slot(state, symbol)] == FAIL {
                    state = self.fail[state as usize];
                }
                let target = self.goto[self.slot(state, symbol)];

                self.fail[child as usize] = target;
                let inherited = self.outputs[target as usize].clone();
                self.outputs[child as usize].extend(inherited);
            }
        }
    }

    fn freeze(self) -> PatternMatcher {
        let mut output_ranges = Vec::with_capacity(self.outputs.len() + 1);
        let mut outputs = Vec::new();
        output_ranges.push(0u32);
        for ids in &self.outputs {
            outputs.extend_from_slice(ids);
            output_ranges.push(outputs.len() as u32);
        }

        PatternMatcher {
            symbols: self.symbols,
            alphabet: self.alphabet.into_boxed_slice(),
            stride: self.stride,
            goto: self.goto.into_boxed_slice(),
            fail: self.fail.into_boxed_slice(),
            output_ranges: output_ranges.into_boxed_slice(),
            outputs: outputs.into_boxed_slice(),
            patterns: self.patterns.into_boxed_slice(),
        }
    }
}
