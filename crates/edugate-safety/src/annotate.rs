//! Code Annotation - explain known school-domain codes in results
//!
//! Absence records carry short reason codes. When a shaped result mentions
//! one as a whole word, a reference block is appended after the payload. The
//! payload text itself is never modified.

use regex::Regex;

/// Known absence reason codes, in display order
pub const KNOWN_CODES: &[(&str, &str)] = &[
    ("EXC", "excused absence"),
    ("UNX", "unexcused absence"),
    ("MED", "absence covered by a medical certificate"),
    ("LAT", "late arrival"),
    ("SCH", "school event (field trip, competition), not counted as absent"),
    ("LEA", "approved leave of absence"),
];

/// Detects known codes in result text
pub struct CodeAnnotator {
    pattern: Option<Regex>,
}

impl CodeAnnotator {
    pub fn new() -> Self {
        let alternation = KNOWN_CODES
            .iter()
            .map(|(code, _)| regex::escape(code))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternation)).ok();
        Self { pattern }
    }

    /// Codes found in `text`, once each, in table order
    pub fn find_codes(&self, text: &str) -> Vec<(&'static str, &'static str)> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let found: Vec<&str> = pattern.find_iter(text).map(|m| m.as_str()).collect();
        KNOWN_CODES
            .iter()
            .filter(|(code, _)| found.contains(code))
            .copied()
            .collect()
    }

    /// Reference block for the codes found in `text`, if any
    pub fn annotation(&self, text: &str) -> Option<String> {
        let codes = self.find_codes(text);
        if codes.is_empty() {
            return None;
        }

        let mut block = String::from("Code reference:");
        for (code, meaning) in codes {
            block.push_str(&format!("\n- {}: {}", code, meaning));
        }
        Some(block)
    }

    /// `text` followed by the reference block, if any codes were found
    pub fn annotate(&self, text: String) -> String {
        match self.annotation(&text) {
            Some(block) => format!("{}\n\n{}", text, block),
            None => text,
        }
    }
}

impl Default for CodeAnnotator {
    fn default() -> Self {
        Self::new()
    }
}
