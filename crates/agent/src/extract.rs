//! JSON action extraction from free-form model output.
//!
//! Model replies mix prose ("Thought: ...", "PAUSE") with an embedded JSON
//! object naming the action to run. Every `{` is paired with its matching
//! `}` in one pass, so nested parameter objects are kept whole; an opener
//! that never closes falls back to the shortest `{...}` span. Candidates
//! that fail to parse are skipped; extraction never errors.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn brace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[{}]").expect("brace pattern compiles"))
}

/// Action request embedded in model text.
///
/// Wire format: `{"function_name": "...", "function_parms": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    #[serde(rename = "function_name")]
    pub name: String,
    #[serde(
        rename = "function_parms",
        default,
        deserialize_with = "nullable_parameters"
    )]
    pub parameters: Map<String, Value>,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// `"function_parms": null` reads as no parameters
fn nullable_parameters<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lazy left-to-right sequence of JSON values embedded in text.
///
/// Single pass: once exhausted it stays exhausted.
pub struct JsonCandidates<'a> {
    text: &'a str,
    spans: Vec<(usize, usize)>,
    next: usize,
    /// End of the last parsed value; spans starting before it are inside it
    pos: usize,
}

impl<'a> JsonCandidates<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            spans: candidate_spans(text),
            next: 0,
            pos: 0,
        }
    }
}

impl Iterator for JsonCandidates<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        while let Some(&(start, end)) = self.spans.get(self.next) {
            self.next += 1;
            if start < self.pos {
                continue;
            }
            if let Some(value) = try_parse(&self.text[start..end]) {
                self.pos = end;
                return Some(value);
            }
        }
        None
    }
}

/// Parse a candidate, discarding it on failure
fn try_parse(candidate: &str) -> Option<Value> {
    serde_json::from_str(candidate).ok()
}

/// Byte spans of every `{`-started candidate, ordered by start.
///
/// One regex pass visits each brace; openers are paired with closers
/// through a stack. An opener left
/// unpaired ends at the first `}` after it, or is dropped when none
/// follows.
fn candidate_spans(text: &str) -> Vec<(usize, usize)> {
    if !text.contains('{') {
        return Vec::new();
    }

    let mut opens = Vec::new();
    let mut ends: Vec<Option<usize>> = Vec::new();
    let mut closes = Vec::new();
    let mut stack = Vec::new();

    for brace in brace_pattern().find_iter(text) {
        let offset = brace.start();
        match brace.as_str() {
            "{" => {
                stack.push(opens.len());
                opens.push(offset);
                ends.push(None);
            }
            _ => {
                closes.push(offset);
                if let Some(open) = stack.pop() {
                    ends[open] = Some(offset + 1);
                }
            }
        }
    }

    opens
        .into_iter()
        .zip(ends)
        .filter_map(|(start, end)| {
            let end = end.or_else(|| {
                let next_close = closes.partition_point(|&close| close < start);
                closes.get(next_close).map(|&close| close + 1)
            })?;
            Some((start, end))
        })
        .collect()
}

/// Every JSON value embedded in `text`, or `None` when there are none
pub fn extract_json(text: &str) -> Option<Vec<Value>> {
    let values: Vec<Value> = JsonCandidates::new(text).collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// First embedded value shaped like an action descriptor
pub fn find_action(text: &str) -> Option<ActionDescriptor> {
    JsonCandidates::new(text).find_map(|value| serde_json::from_value(value).ok())
}
