use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::config::CommitMessageConfig;

/// `type(scope)!: subject`. The scope group is deliberately loose so that
/// malformed scopes still match and can be discarded afterwards.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[\w-]+)(?P<scope>\([^:]*)?(?P<breaking>!)?:\s*(?P<subject>\S.*?)\s*$")
        .expect("Invalid header regex")
});

static FOOTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>[A-Za-z][A-Za-z0-9-]*)(?::\s+| #)(?P<value>.*)$")
        .expect("Invalid footer regex")
});

/// A `Token: value` trailer from the commit body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub token: String,
    pub value: String,
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEntry {
    pub r#type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub footers: Vec<Footer>,
    pub is_breaking_change: bool,
    /// Message of the breaking-change footer, when the body carries one
    pub breaking_message: Option<String>,
    /// Commit hash or other link target; empty when unknown
    pub reference: String,
}

impl CommitEntry {
    /// Create a plain, non-breaking entry
    pub fn new(r#type: impl Into<String>, scope: Option<&str>, subject: impl Into<String>) -> Self {
        CommitEntry {
            r#type: r#type.into(),
            scope: scope.map(str::to_string),
            subject: subject.into(),
            body: None,
            footers: Vec::new(),
            is_breaking_change: false,
            breaking_message: None,
            reference: String::new(),
        }
    }

    /// Parse a commit message using the default breaking-change markers
    pub fn parse(message: &str) -> Option<Self> {
        CommitParser::default().parse(message)
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Mark the entry as breaking, optionally with an explicit message
    pub fn breaking(mut self, message: Option<&str>) -> Self {
        self.is_breaking_change = true;
        self.breaking_message = message.map(str::to_string);
        self
    }

    /// Text listed under the breaking changes heading.
    ///
    /// The footer message wins; a header-only `!` falls back to the subject.
    pub fn breaking_change_message(&self) -> Option<&str> {
        if !self.is_breaking_change {
            return None;
        }
        Some(self.breaking_message.as_deref().unwrap_or(&self.subject))
    }
}

/// Result of parsing a batch of raw messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub entries: Vec<CommitEntry>,
    /// Messages that did not carry a `type:` header, in input order
    pub rejected: Vec<String>,
}

/// Conventional commit parser
///
/// Supports headers of the form:
/// - type(scope)!: subject
/// - type(scope): subject
/// - type!: subject
/// - type: subject
///
/// followed by an optional body and footers.
#[derive(Debug, Clone)]
pub struct CommitParser {
    breaking_change_markers: Vec<String>,
}

impl Default for CommitParser {
    fn default() -> Self {
        CommitParser::from_config(&CommitMessageConfig::default())
    }
}

impl CommitParser {
    pub fn new(breaking_change_markers: Vec<String>) -> Self {
        CommitParser {
            breaking_change_markers,
        }
    }

    pub fn from_config(config: &CommitMessageConfig) -> Self {
        CommitParser::new(config.breaking_change_markers.clone())
    }

    /// Parse one raw commit message.
    ///
    /// Returns `None` when the first line is not a conventional header.
    pub fn parse(&self, message: &str) -> Option<CommitEntry> {
        let message = message.trim();
        let (header, rest) = match message.split_once('\n') {
            Some((header, rest)) => (header.trim(), Some(rest)),
            None => (message, None),
        };

        let Some(captures) = HEADER_REGEX.captures(header) else {
            tracing::trace!(header, "not a conventional commit header");
            return None;
        };

        let r#type = captures["type"].to_string();
        let subject = captures["subject"].to_string();
        let mut header_breaking = captures.name("breaking").is_some();
        let scope = match captures.name("scope") {
            Some(raw) => {
                let (scope, bang) = split_scope(raw.as_str());
                header_breaking |= bang;
                scope
            }
            None => None,
        };

        let (body, footers) = rest.map(|rest| self.parse_body(rest)).unwrap_or_default();

        let breaking_message = footers
            .iter()
            .find(|f| self.is_breaking_token(&f.token))
            .map(|f| f.value.clone());
        let is_breaking_change = header_breaking || breaking_message.is_some();

        Some(CommitEntry {
            r#type,
            scope,
            subject,
            body,
            footers,
            is_breaking_change,
            breaking_message,
            reference: String::new(),
        })
    }

    /// Parse every message, keeping rejected ones aside.
    pub fn parse_all<S: AsRef<str>>(&self, messages: &[S]) -> ParsedBatch {
        let mut batch = ParsedBatch::default();
        for message in messages {
            match self.parse(message.as_ref()) {
                Some(entry) => batch.entries.push(entry),
                None => batch.rejected.push(message.as_ref().to_string()),
            }
        }
        tracing::debug!(
            parsed = batch.entries.len(),
            rejected = batch.rejected.len(),
            "parsed commit messages"
        );
        batch
    }

    fn is_breaking_token(&self, token: &str) -> bool {
        self.breaking_change_markers.iter().any(|m| m == token)
    }

    /// Breaking-change footer; recognised on any body line.
    fn match_breaking_footer(&self, line: &str) -> Option<Footer> {
        self.breaking_change_markers.iter().find_map(|marker| {
            let value = line.strip_prefix(marker.as_str())?.strip_prefix(':')?;
            Some(Footer {
                token: marker.clone(),
                value: value.trim().to_string(),
            })
        })
    }

    /// Generic `Token: value` or `Token #value` footer
    fn match_footer(line: &str) -> Option<Footer> {
        FOOTER_REGEX.captures(line).map(|caps| Footer {
            token: caps["token"].to_string(),
            value: caps["value"].trim().to_string(),
        })
    }

    /// Split the text after the header into free-form body and footers.
    ///
    /// Generic footers begin at the first paragraph whose first line is a
    /// footer token. A breaking-change marker starts a footer on any line.
    /// Lines that follow a footer and are not themselves footers continue it.
    fn parse_body(&self, rest: &str) -> (Option<String>, Vec<Footer>) {
        let mut body_lines: Vec<&str> = Vec::new();
        let mut footers: Vec<Footer> = Vec::new();
        let mut previous_blank = true;

        for line in rest.lines() {
            let starts_paragraph = previous_blank || !footers.is_empty();
            let footer = self
                .match_breaking_footer(line)
                .or_else(|| Self::match_footer(line).filter(|_| starts_paragraph));
            match footer {
                Some(footer) => footers.push(footer),
                None if footers.is_empty() => body_lines.push(line),
                None => {
                    if let Some(last) = footers.last_mut() {
                        if !line.trim().is_empty() {
                            if !last.value.is_empty() {
                                last.value.push('\n');
                            }
                            last.value.push_str(line.trim());
                        }
                    }
                }
            }
            previous_blank = line.trim().is_empty();
        }

        let body = body_lines.join("\n").trim().to_string();
        ((!body.is_empty()).then_some(body), footers)
    }
}

/// Turn the raw `(scope)` capture into a scope, reporting a trailing `!`.
///
/// Anything that is not a single non-empty parenthesised word is treated as
/// "no scope".
fn split_scope(raw: &str) -> (Option<String>, bool) {
    let (raw, bang) = match raw.strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (raw, false),
    };

    let scope = raw
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.contains(['(', ')']))
        .map(str::to_string);

    (scope, bang)
}
