//! Strips solution content from Quarto course documents so they can be
//! handed out as exercises. Three kinds of regions are rewritten:
//! `echo: false` in the YAML header, code cells labeled `q-`, and
//! `::: {.answer}` divs.

use lazy_static::lazy_static;
use regex::Regex;
use std::str::Lines;

lazy_static! {
    // Quarto cell option declaring a question cell, e.g. `#| label: q-3`
    static ref Q_CELL_START: Regex = Regex::new(r"(?i)^#\|\s*label:\s*q-.*$").unwrap();
    // Older chunk header style, e.g. `    ```{r, question-07, eval=FALSE}
    static ref LEGACY_QUESTION_START: Regex =
        Regex::new(r"(?i)^```\{r\s*,\s*question-\d+.*\}$").unwrap();
    static ref ANSWER_DIV_START: Regex = Regex::new(r"(?i)^:::\s*\{\.answer\}\s*$").unwrap();
    static ref ECHO_FALSE: Regex = Regex::new(r"(?i)^echo\s*:\s*false\s*$").unwrap();
}

const METADATA_DELIMITER: &str = "---";
const FENCE: &str = "```";
const CELL_OPTION_PREFIX: &str = "#|";
const ANSWER_DIV_END: &str = ":::";
const ECHO_TRUE: &str = "echo: true";
const ANSWER_PLACEHOLDER: &str = "Your answer here.";

// The YAML header and a labeled cell can never legitimately overlap, so
// the pass runs on a single enum instead of independent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Metadata,
    LabeledCell,
}

// Rewrite a whole document. Lines are classified on their trimmed form
// but emitted with their original text; every emitted line is terminated
// with '\n'. A region left unclosed at end of input ends the pass
// silently.
pub fn clear_solutions(input: &str) -> String {
    let mut output = String::new();
    let mut lines = input.lines();
    let mut state = State::Default;

    while let Some(line) = lines.next() {
        let stripped = line.trim();

        // The metadata delimiter wins over any other classification
        if stripped == METADATA_DELIMITER {
            state = if state == State::Metadata {
                State::Default
            } else {
                State::Metadata
            };
            push_line(&mut output, line);
            continue;
        }

        match state {
            State::Metadata => {
                if ECHO_FALSE.is_match(stripped) {
                    push_line(&mut output, ECHO_TRUE);
                } else {
                    push_line(&mut output, line);
                }
            }
            State::LabeledCell => {
                if stripped.starts_with(CELL_OPTION_PREFIX) {
                    // Still cell options, keep them
                    push_line(&mut output, line);
                } else if stripped == FENCE {
                    state = State::Default;
                    push_line(&mut output, line);
                }
                // Anything else is solution content and is dropped
            }
            State::Default => {
                if Q_CELL_START.is_match(stripped) {
                    state = State::LabeledCell;
                    push_line(&mut output, line);
                } else if LEGACY_QUESTION_START.is_match(stripped) {
                    push_line(&mut output, line);
                    blank_until_fence(&mut lines, &mut output);
                } else if ANSWER_DIV_START.is_match(stripped) {
                    push_line(&mut output, line);
                    push_line(&mut output, ANSWER_PLACEHOLDER);
                    skip_until_div_end(&mut lines, &mut output);
                } else {
                    push_line(&mut output, line);
                }
            }
        }
    }

    output
}

// Consume a legacy question chunk body, keeping `#|` option lines. The
// closing fence is re-emitted in normalized form, even when the source
// line carries extra whitespace.
fn blank_until_fence(lines: &mut Lines, output: &mut String) {
    for line in lines {
        let stripped = line.trim();
        if stripped == FENCE {
            push_line(output, FENCE);
            return;
        }
        if stripped.starts_with(CELL_OPTION_PREFIX) {
            push_line(output, line);
        }
    }
}

// Consume an answer div body; only the fixed closing token survives.
fn skip_until_div_end(lines: &mut Lines, output: &mut String) {
    for line in lines {
        if line.trim() == ANSWER_DIV_END {
            push_line(output, ANSWER_DIV_END);
            return;
        }
    }
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}
