//! Statistics over generated type definitions.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an indented `name: {` line opening a table (or view/function) block.
static TABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s+(\w+):\s*\{$").expect("table pattern is valid")
});

/// Line count and table names found in generated content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStats {
    /// Number of newline characters.
    pub lines: usize,
    /// Names of the blocks that look like tables, in order of appearance.
    pub tables: Vec<String>,
}

impl ContentStats {
    pub fn collect(content: &str) -> Self {
        let lines = content.matches('\n').count();
        let tables = TABLE_PATTERN
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .collect();
        Self { lines, tables }
    }

    /// The first `n` table names.
    pub fn sample(&self, n: usize) -> &[String] {
        &self.tables[..self.tables.len().min(n)]
    }
}

/// Format a count with thousands separators (e.g. `12,345`).
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Presence check of expected tables in generated content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCheck {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl TableCheck {
    /// Look up each expected table name (case-insensitive substring match).
    pub fn run<S: AsRef<str>>(content: &str, expected: &[S]) -> Self {
        let haystack = content.to_lowercase();
        let mut check = Self::default();
        for table in expected {
            let table = table.as_ref();
            if haystack.contains(&table.to_lowercase()) {
                check.found.push(table.to_string());
            } else {
                check.missing.push(table.to_string());
            }
        }
        check
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty() && self.missing.is_empty()
    }
}
