use regex::Regex;

/// The open/close tag markers the model is told to wrap its final answer in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: String,
    pub close: String,
}

impl DelimiterPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// The fixed response-format directive appended to every user prompt.
    pub fn format_directive(&self) -> String {
        format!(
            "\nWrite your answer between the following tags: {}{}. Do not use any additional tags.",
            self.open, self.close
        )
    }
}

impl Default for DelimiterPair {
    fn default() -> Self {
        Self::new("<response>", "</response>")
    }
}

/// Pulls a validated answer out of raw model output.
///
/// Strict on whether a delimited span exists, lenient on the span itself:
/// downstream consumers need a usable answer more than a perfectly clean
/// one, so malformed nesting inside an extracted span is logged, not
/// rejected.
pub struct ResponseExtractor {
    tags: DelimiterPair,
    pattern: Regex,
}

impl ResponseExtractor {
    pub fn new(tags: DelimiterPair) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            "(?is){}(.*?){}",
            regex::escape(&tags.open),
            regex::escape(&tags.close)
        ))?;
        Ok(Self { tags, pattern })
    }

    pub fn tags(&self) -> &DelimiterPair {
        &self.tags
    }

    /// Whether the closing tag appears anywhere in `text` (case-insensitive).
    pub fn contains_closing_tag(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.tags.close.to_lowercase())
    }

    /// Extract the delimited answer from `text`, or `None` if no valid span
    /// exists. Multiple spans are tolerated and space-joined in order of
    /// appearance: the protocol accepts a model that closes and reopens the
    /// tag.
    pub fn extract(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            tracing::warn!("Empty text provided for response extraction");
            return None;
        }

        let spans: Vec<&str> = self
            .pattern
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .collect();

        if spans.is_empty() {
            tracing::warn!("No response tags found in text");
            return None;
        }

        if spans.len() > 1 {
            tracing::warn!(count = spans.len(), "Multiple response tags found, concatenating content");
            let joined = spans
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            if joined.is_empty() {
                return None;
            }
            return Some(joined);
        }

        let content = spans[0];
        if content.is_empty() {
            tracing::warn!("Empty response content detected");
            return None;
        }
        if content.contains(&self.tags.open) || content.contains(&self.tags.close) {
            tracing::warn!("Possible nested or malformed tags detected in response");
        }

        Some(content.to_string())
    }
}
