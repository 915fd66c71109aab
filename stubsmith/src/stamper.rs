//! Post-processing of generated stubs
//!
//! A freshly generated stub carries two markers: a start marker at the top of
//! the file (`<?php`) and a placeholder line in the class body (`//`). The
//! stamper rewrites the file once:
//!
//! 1. If a table binding is requested, the first placeholder line becomes an
//!    explanatory comment followed by the binding declaration. A bound
//!    connection is declared on that line too, with or without the table.
//! 2. The first start marker is followed by a provenance comment carrying the
//!    current timestamp.
//!
//! Both edits are applied in memory and written back with a single write.
//! Inserted lines reuse the line ending of the line they are attached to.
//!
//! Stamping is **not** idempotent. The placeholder is consumed by the first
//! pass, but the start marker survives, so every further call prepends
//! another provenance comment. Call [`FileStamper::stamp`] exactly once per
//! generated file.

use crate::config::StampSettings;
use crate::error::ScaffoldError;
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::Path;

/// Timestamp format used in provenance comments
pub const STAMP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What to bind into a stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBinding {
    /// Source table name
    pub table: String,
    /// Replace the placeholder with a `$table` declaration
    pub inject: bool,
    /// Connection name, injected only when enabled in [`StampSettings`]
    pub connection: Option<String>,
}

impl TableBinding {
    /// Binding for `table`
    pub fn new(table: impl Into<String>, inject: bool) -> Self {
        Self {
            table: table.into(),
            inject,
            connection: None,
        }
    }

    /// Attach a connection name
    #[must_use]
    pub fn with_connection(mut self, connection: Option<String>) -> Self {
        self.connection = connection;
        self
    }
}

/// Rewrites generated stubs in place
#[derive(Debug, Clone)]
pub struct FileStamper {
    settings: StampSettings,
}

impl FileStamper {
    /// Create a stamper
    #[must_use]
    pub const fn new(settings: StampSettings) -> Self {
        Self { settings }
    }

    /// Stamping settings in use
    #[must_use]
    pub const fn settings(&self) -> &StampSettings {
        &self.settings
    }

    /// Stamp the file at `path` using the current local time
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the file cannot be read or written.
    pub fn stamp(&self, path: &Path, binding: &TableBinding) -> Result<usize, ScaffoldError> {
        let content = fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        let stamped = self.apply_now(&content, binding);

        fs::write(path, &stamped).map_err(|e| ScaffoldError::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = stamped.len(), "Stamped stub");

        Ok(stamped.len())
    }

    /// Apply binding injection and the provenance stamp to `content`
    #[must_use]
    pub fn apply(&self, content: &str, binding: &TableBinding, at: NaiveDateTime) -> String {
        let content = if binding.inject || self.connection(binding).is_some() {
            self.inject_binding(content, binding)
        } else {
            content.to_string()
        };
        self.insert_stamp(&content, at)
    }

    /// [`FileStamper::apply`] with the current local time
    #[must_use]
    pub fn apply_now(&self, content: &str, binding: &TableBinding) -> String {
        self.apply(content, binding, Local::now().naive_local())
    }

    /// Provenance comment for `at`, e.g. `// Generated by Stubsmith @2024-01-01 10:00:00`
    #[must_use]
    pub fn stamp_comment(&self, at: NaiveDateTime) -> String {
        format!(
            "{} Generated by {} @{}",
            self.settings.comment_prefix,
            self.settings.tool_name,
            at.format(STAMP_TIME_FORMAT)
        )
    }

    /// Declaration binding the class to `table`
    #[must_use]
    pub fn table_declaration(&self, table: &str) -> String {
        self.declaration("table", table)
    }

    /// Connection to declare for `binding`, if connection binding is enabled
    fn connection<'a>(&self, binding: &'a TableBinding) -> Option<&'a str> {
        binding
            .connection
            .as_deref()
            .filter(|_| self.settings.bind_connection)
    }

    fn declaration(&self, field: &str, value: &str) -> String {
        let field_type = self
            .settings
            .field_type
            .as_deref()
            .map(|t| format!("{t} "))
            .unwrap_or_default();
        format!(
            "{} {field_type}${field} = '{}';",
            self.settings.visibility,
            value.replace('\'', "\\'")
        )
    }

    fn inject_binding(&self, content: &str, binding: &TableBinding) -> String {
        let placeholder = self.settings.placeholder.as_str();
        if placeholder.is_empty() {
            tracing::warn!("Placeholder token is empty; skipping table binding");
            return content.to_string();
        }

        let Some(line) = find_placeholder_line(content, placeholder) else {
            tracing::warn!(placeholder, "Placeholder not found; table binding not injected");
            return content.to_string();
        };

        let mut lines = Vec::with_capacity(3);
        if binding.inject {
            lines.push(format!(
                "{} {}",
                self.settings.comment_prefix, self.settings.binding_comment
            ));
            lines.push(self.table_declaration(&binding.table));
        }
        if let Some(connection) = self.connection(binding) {
            lines.push(self.declaration("connection", connection));
        }
        let separator = format!("{}{}", line.eol, line.indent);
        let replacement = lines.join(separator.as_str());

        let mut out = String::with_capacity(content.len() + replacement.len());
        out.push_str(&content[..line.start]);
        out.push_str(&replacement);
        out.push_str(&content[line.start + placeholder.len()..]);
        out
    }

    fn insert_stamp(&self, content: &str, at: NaiveDateTime) -> String {
        let marker = self.settings.start_marker.as_str();
        let Some(index) = content.find(marker).filter(|_| !marker.is_empty()) else {
            tracing::warn!(marker, "Start marker not found; provenance stamp skipped");
            return content.to_string();
        };

        let eol = line_ending(&content[index + marker.len()..]);
        let stamp = format!("{marker}{eol}{eol}{}", self.stamp_comment(at));
        content.replacen(marker, &stamp, 1)
    }
}

/// Location of a placeholder line
struct PlaceholderLine<'a> {
    /// Byte offset of the placeholder token
    start: usize,
    indent: &'a str,
    eol: &'static str,
}

/// First line consisting solely of `placeholder`
fn find_placeholder_line<'a>(content: &'a str, placeholder: &str) -> Option<PlaceholderLine<'a>> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        if body.trim() == placeholder {
            let indent_len = body.len() - body.trim_start().len();
            return Some(PlaceholderLine {
                start: offset + indent_len,
                indent: &body[..indent_len],
                eol: line_ending(&line[body.len()..]),
            });
        }
        offset += line.len();
    }
    None
}

/// Line terminator at the start of `rest`, defaulting to `\n`
fn line_ending(rest: &str) -> &'static str {
    if rest.starts_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
