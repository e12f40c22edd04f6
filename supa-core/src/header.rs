//! Header comment written on top of generated type files.

use std::fmt::Write;

use chrono::{DateTime, Utc};

/// Command shown in the header when none is configured.
pub const DEFAULT_REGENERATE_COMMAND: &str = "supatype";

const TITLE: &str = "/**\n * Supabase Database Types\n";
const CLOSING: &str = "\n */\n";

/// Header comment for a generated types file.
#[derive(Debug, Clone)]
pub struct Header {
    generated_at: DateTime<Utc>,
    schemas: Vec<String>,
    regenerate_command: String,
}

impl Header {
    /// Create a header stamped with the current time.
    pub fn new(schemas: &[String]) -> Self {
        Self::at(Utc::now(), schemas)
    }

    /// Create a header with an explicit timestamp.
    pub fn at(generated_at: DateTime<Utc>, schemas: &[String]) -> Self {
        Self {
            generated_at,
            schemas: schemas.to_vec(),
            regenerate_command: DEFAULT_REGENERATE_COMMAND.to_string(),
        }
    }

    /// Set the command readers are told to run to regenerate the file.
    pub fn regenerate_command(mut self, command: impl Into<String>) -> Self {
        self.regenerate_command = command.into();
        self
    }

    /// Render the header, including the blank line that separates it from the body.
    pub fn render(&self) -> String {
        let mut out = String::from(TITLE);
        out.push_str(" *\n");
        let _ = writeln!(
            out,
            " * Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out, " * Schemas: {}", self.schemas.join(", "));
        out.push_str(" *\n");
        out.push_str(" * DO NOT EDIT THIS FILE MANUALLY.\n");
        let _ = writeln!(out, " * Run `{}` to regenerate.", self.regenerate_command);
        out.push_str(
            " *\n \
             * Best Practices:\n \
             * 1. Never manually edit this file\n \
             * 2. Regenerate after any database schema changes\n \
             * 3. Use type helpers for complex queries:\n \
             *    - Tables<'tableName'> for row types\n \
             *    - TablesInsert<'tableName'> for inserts\n \
             *    - TablesUpdate<'tableName'> for updates\n \
             * 4. Create wrapper types in separate files for business logic\n \
             */\n\n",
        );
        out
    }
}

/// Strip a leading generated header, returning the body underneath it.
///
/// Text that doesn't start with a generated header is returned unchanged.
pub fn strip_header(text: &str) -> &str {
    if !text.starts_with(TITLE) {
        return text;
    }
    match text.find(CLOSING) {
        Some(idx) => {
            let rest = &text[idx + CLOSING.len()..];
            rest.strip_prefix('\n').unwrap_or(rest)
        }
        None => text,
    }
}
