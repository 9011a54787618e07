//! Distills raw recognized text into a trustworthy server number.
//!
//! The engine routinely emits spurious numeric fragments (player
//! counts, version strings, mangled glyphs), so a candidate has to
//! clear a plausibility gate on the whole text and a per-candidate
//! context check before it is believed.

use crate::error::OcrError;
use regex::Regex;

/// Upper bound on text length for a genuine server-browser screen.
const MAX_TEXT_CHARS: usize = 500;
/// Upper bound on distinct digit runs for a genuine screen.
const MAX_DIGIT_RUNS: usize = 20;
/// Upper bound on `#` occurrences for a genuine screen.
const MAX_HASH_COUNT: usize = 5;
/// Inputs shorter than this skip the screen-shape checks when they
/// already carry an unambiguous candidate.
const SHORT_INPUT_CHARS: usize = 50;
/// Extra characters tolerated around a candidate on its own line.
const LINE_SLACK_CHARS: usize = 3;
/// The banner renders near the top; candidates first seen below this
/// many lines are treated as noise.
const TOP_LINES: usize = 5;

/// Markers that never appear on the target screen.
const FOREIGN_MARKERS: [&str; 4] = ["error", "lorem", "ipsum", "http"];

/// Server-number extraction over raw engine output. Stateless per
/// call; the compiled patterns are built once and reused.
pub struct ServerNumberExtractor {
    /// The expected exact rendering: `#` plus 3-5 digits between word
    /// boundaries.
    strict: Regex,
    /// Fallback tolerating noise glued to the front of the candidate.
    flexible: Regex,
    /// Full-match shape check for accepted candidates.
    format: Regex,
    /// Single-line inputs that carry a candidate outright.
    short_unambiguous: Regex,
}

impl ServerNumberExtractor {
    pub fn new() -> Self {
        // Patterns are fixed literals; construction cannot fail.
        Self {
            strict: Regex::new(r"(?:^|\s)(#[0-9]{3,5})(?:\s|$)").expect("strict pattern"),
            flexible: Regex::new(r"(#[0-9]{3,5})(?:\s|$|[^0-9])").expect("flexible pattern"),
            format: Regex::new(r"^#[0-9]{3,5}$").expect("format pattern"),
            short_unambiguous: Regex::new(r"^.*#[0-9]{3,5}.*$").expect("short pattern"),
        }
    }

    /// Extracts the bare digit string, or reports that nothing
    /// survived validation.
    pub fn extract(&self, text: &str) -> Result<String, OcrError> {
        self.find(text)
            .map(|candidate| strip_hash(&candidate))
            .ok_or(OcrError::NoServerNumber)
    }

    /// Finds the `#`-prefixed candidate, if any survives validation.
    pub fn find(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        if !self.looks_like_server_screen(text) {
            tracing::debug!("text does not look like a server screen");
            return None;
        }

        if let Some(caps) = self.strict.captures(text) {
            let candidate = &caps[1];
            if self.validate(candidate, text) {
                tracing::debug!("accepted candidate from strict pattern: {}", candidate);
                return Some(candidate.to_string());
            }
            tracing::debug!("rejected candidate from strict pattern: {}", candidate);
        }

        if let Some(caps) = self.flexible.captures(text) {
            let candidate = &caps[1];
            if self.validate(candidate, text) {
                tracing::debug!("accepted candidate from fallback pattern: {}", candidate);
                return Some(candidate.to_string());
            }
            tracing::debug!("rejected candidate from fallback pattern: {}", candidate);
        }

        None
    }

    /// Whole-text plausibility gate, applied before any extraction.
    fn looks_like_server_screen(&self, text: &str) -> bool {
        // Minimal inputs that already carry an unambiguous candidate
        // skip the shape checks entirely.
        if text.trim().chars().count() < SHORT_INPUT_CHARS
            && text.contains('#')
            && self.short_unambiguous.is_match(text)
        {
            return true;
        }

        if text.chars().count() > MAX_TEXT_CHARS {
            tracing::debug!("text too long: {} chars", text.chars().count());
            return false;
        }

        let digit_runs = count_digit_runs(text);
        if digit_runs > MAX_DIGIT_RUNS {
            tracing::debug!("too many digit runs: {}", digit_runs);
            return false;
        }

        let hashes = text.matches('#').count();
        if hashes > MAX_HASH_COUNT {
            tracing::debug!("too many '#' characters: {}", hashes);
            return false;
        }

        let lower = text.to_lowercase();
        if FOREIGN_MARKERS.iter().any(|marker| lower.contains(marker)) {
            tracing::debug!("text contains markers foreign to the server screen");
            return false;
        }

        true
    }

    /// Context check for one candidate against the full text.
    fn validate(&self, candidate: &str, text: &str) -> bool {
        if !self.format.is_match(candidate) {
            return false;
        }

        // The candidate is the whole input, or close to it.
        if text.trim() == candidate {
            return true;
        }
        if text.chars().count() < SHORT_INPUT_CHARS && text.contains(candidate) {
            return true;
        }

        // The number typically sits alone, or nearly alone, on its line.
        let lines: Vec<&str> = text.split('\n').collect();
        for line in &lines {
            let trimmed = line.trim();
            if trimmed == candidate
                || (trimmed.contains(candidate)
                    && trimmed.chars().count() <= candidate.len() + LINE_SLACK_CHARS)
            {
                return true;
            }
        }

        // Otherwise it must at least appear near the top of the screen.
        let in_top = lines
            .iter()
            .take(TOP_LINES)
            .any(|line| line.contains(candidate));
        if !in_top {
            tracing::debug!("candidate {} only appears below the top lines", candidate);
        }
        in_top
    }
}

impl Default for ServerNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts maximal runs of consecutive ASCII digits.
fn count_digit_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs
}

/// Removes the `#` prefix from a candidate. Idempotent on inputs that
/// already lack it.
pub fn strip_hash(candidate: &str) -> String {
    candidate.replace('#', "")
}
