//! Structured JSON logging.
//!
//! One log line per event, written synchronously with deterministic field
//! ordering (event, severity, then fields sorted by key).

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger writing one JSON object per line.
pub struct Logger;

impl Logger {
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Info, event, fields, &mut io::stdout());
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Warn, event, fields, &mut io::stderr());
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Error, event, fields, &mut io::stderr());
    }

    fn write_line<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":\"");
        escape_into(&mut line, event);
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        for (key, value) in sorted {
            line.push_str(",\"");
            escape_into(&mut line, key);
            line.push_str("\":\"");
            escape_into(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

fn escape_into(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}
