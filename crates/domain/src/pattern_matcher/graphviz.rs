use super::{PatternMatcher, FAIL, ROOT};
use std::collections::VecDeque;
use std::fmt::Write;

const STYLE_FAILURE_TRANSITION: &str = " [style=dashed, color=gray, constraint=false];";
const STYLE_STATE_WITHOUT_OUTPUT: &str = " [shape=circle];";
const STYLE_STATE_WITH_OUTPUT: &str = " [shape=doublecircle];";

impl PatternMatcher {
    /// Render the automaton in Graphviz DOT format.
    ///
    /// Goto edges are bold, failure links dashed, and states that recognise a
    /// pattern are drawn as double circles. Failure links pointing at the root
    /// are omitted unless `show_root_edges` is set.
    pub fn to_graphviz(&self, show_root_edges: bool) -> String {
        let mut dot = String::from("digraph automaton {\n\tgraph [rankdir=LR];\n");

        let mut visited = Vec::new();
        let mut queue = VecDeque::from([ROOT]);
        while let Some(state) = queue.pop_front() {
            visited.push(state);
            for (symbol, &byte) in self.alphabet.iter().enumerate() {
                let next = self.transition(state, symbol);
                if next == FAIL || next == ROOT {
                    continue;
                }
                queue.push_back(next);
                let _ = writeln!(
                    dot,
                    "\t{state} -> {next} [label=\"{}\", weight=100, style=bold];",
                    (byte as char).escape_default()
                );
            }
        }

        for &state in &visited {
            let fail = self.fail[state as usize];
            if show_root_edges || fail != ROOT || state == ROOT {
                let _ = writeln!(dot, "\t{state} -> {fail}{STYLE_FAILURE_TRANSITION}");
            }
        }

        for &state in &visited {
            let style = if self.output_range(state).is_empty() {
                STYLE_STATE_WITHOUT_OUTPUT
            } else {
                STYLE_STATE_WITH_OUTPUT
            };
            let _ = writeln!(dot, "\t{state}{style}");
        }

        dot.push('}');
        dot
    }
}
