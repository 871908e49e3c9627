//! Log sanitization for PII and secrets.
//!
//! Applied to formatted log lines before they reach the sink. Covers:
//! - User and record ids (UUIDs)
//! - Email addresses and phone numbers
//! - Identity document numbers (Aadhar, PAN)
//! - Bank account and IFSC codes
//! - Common secret formats (JWTs, `password=...` style pairs)
//!
//! Prefer keeping sensitive values out of log calls altogether; this is the
//! fallback for what slips through.
//!
//! Inputs longer than the configured limit are truncated before scanning.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static RULES: OnceLock<RedactionRules> = OnceLock::new();

/// Default maximum number of bytes sanitized per call (16 KiB).
pub const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Redaction {
    regex: Regex,
    replacement: &'static str,
}

struct RedactionRules {
    set: RegexSet,
    redactions: Vec<Redaction>,
}

/// Longest prefix of `input` within `limit` bytes that ends on a char
/// boundary, and whether anything was cut.
fn clip(input: &str, limit: usize) -> (&str, bool) {
    if input.len() <= limit {
        return (input, false);
    }
    let cut = (0..=limit)
        .rev()
        .find(|&i| input.is_char_boundary(i))
        .unwrap_or(0);
    (&input[..cut], true)
}

fn rules() -> &'static RedactionRules {
    RULES.get_or_init(|| {
        // Order matters: earlier replacements run first, so the specific
        // formats come before the broad digit runs.
        let table: Vec<(&'static str, &'static str)> = vec![
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (r"\b[A-Z]{5}[0-9]{4}[A-Z]\b", "[REDACTED-PAN]"),
            (r"\b[A-Z]{4}0[A-Z0-9]{6}\b", "[REDACTED-IFSC]"),
            (r"\b\d{4}\s?\d{4}\s?\d{4}\b", "[REDACTED-AADHAR]"),
            (
                r"(?:\+?1[-.\s]?)?\(?\b[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
            (
                r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b",
                "[REDACTED-JWT]",
            ),
            (
                r"(?i)\b(?:password|passwd|pwd|secret|token|api[_-]?key)\b\s*[:=]\s*\S+",
                "[REDACTED-SECRET]",
            ),
            (r"\b\d{9,18}\b", "[REDACTED-ACCOUNT]"),
        ];

        let set = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let redactions = table
            .into_iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        RedactionRules { set, redactions }
    })
}

/// Redact PII from `input` using the default size limit.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, DEFAULT_SANITIZE_MAX_BYTES)
}

/// Sanitize at most `max_bytes` of `input`, marking truncated output.
#[must_use]
pub fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let table = rules();
    let (head, truncated) = clip(input, max_bytes);

    // Only rules that hit the unmodified text are applied.
    let mut out = table
        .set
        .matches(head)
        .iter()
        .fold(head.to_string(), |text, idx| {
            let rule = &table.redactions[idx];
            rule.regex.replace_all(&text, rule.replacement).into_owned()
        });

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// True if any redaction rule matches `input`.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (head, _) = clip(input, DEFAULT_SANITIZE_MAX_BYTES);
    rules().set.is_match(head)
}
/// A `tracing_subscriber` writer wrapper that sanitizes each formatted log
/// line before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
    max_bytes: usize,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self::with_limit(inner, DEFAULT_SANITIZE_MAX_BYTES)
    }

    #[must_use]
    pub fn with_limit(inner: M, max_bytes: usize) -> Self {
        Self { inner, max_bytes }
    }
}

/// Buffers bytes until a newline, then writes the redacted line through.
pub struct SanitizingWriter<W> {
    inner: W,
    pending: Vec<u8>,
    max_bytes: usize,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn emit(&mut self, raw: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(raw);
        self.inner
            .write_all(sanitize_with_limit(&text, self.max_bytes).as_bytes())
    }

    fn drain_complete_lines(&mut self) -> std::io::Result<()> {
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=newline).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A line with no newline must not buffer without bound.
        let cap = self.max_bytes.saturating_mul(2);
        if cap > 0 && self.pending.len() > cap {
            let oversized = std::mem::take(&mut self.pending);
            self.emit(&oversized)?;
            self.inner.write_all(b"\n")?;
        } else {
            self.drain_complete_lines()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_complete_lines()?;
        if !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            self.emit(&tail)?;
        }
        self.inner.flush()
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for SanitizingMakeWriter<M> {
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
            max_bytes: self.max_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_sanitize_uuid() {
        let input = "user 550e8400-e29b-41d4-a716-446655440000 signed in";
        let sanitized = sanitize(input);
        assert!(sanitized.contains("[REDACTED-UUID]"));
        assert!(!sanitized.contains("550e8400"));
    }

    #[test]
    fn test_sanitize_email() {
        let sanitized = sanitize("login attempt for test@example.com");
        assert_eq!(sanitized, "login attempt for [REDACTED-EMAIL]");
    }

    #[test]
    fn test_sanitize_identity_numbers() {
        let sanitized = sanitize("pan=ABCDE1234F aadhar 1234 5678 9012");
        assert!(sanitized.contains("[REDACTED-PAN]"));
        assert!(sanitized.contains("[REDACTED-AADHAR]"));
        assert!(!sanitized.contains("ABCDE1234F"));
        assert!(!sanitized.contains("9012"));
    }

    #[test]
    fn test_sanitize_phone() {
        let sanitized = sanitize("hospital contact (555) 123-4567");
        assert!(sanitized.contains("[REDACTED-PHONE]"));
        assert!(!sanitized.contains("123-4567"));
    }

    #[test]
    fn test_sanitize_secret_pair() {
        let sanitized = sanitize("password=hunter22 ok");
        assert!(sanitized.contains("[REDACTED-SECRET]"));
        assert!(!sanitized.contains("hunter22"));
    }

    #[test]
    fn test_contains_pii() {
        assert!(contains_pii("id 550e8400-e29b-41d4-a716-446655440000"));
        assert!(!contains_pii("KYC status changed to verified"));
    }

    #[test]
    fn test_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix test@example.com suffix", 10);
        assert!(sanitized.ends_with("[TRUNCATED]"));
        assert!(sanitized.starts_with("prefix"));
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("Lock failed").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let sink = Sink::default();
        let target = sink.clone();
        let make_writer = SanitizingMakeWriter::new(move || target.clone());
        let mut writer = make_writer.make_writer();

        writer.write_all(b"saved session for ").expect("Should write");
        writer.write_all(b"test@example.com\nnext").expect("Should write");
        writer.flush().expect("Should flush");

        let out = String::from_utf8(sink.0.lock().expect("Lock failed").clone())
            .expect("Valid UTF-8");
        assert_eq!(out, "saved session for [REDACTED-EMAIL]\nnext");
    }
}
