//! Generate command report data structures.

use supatype_core::{ContentStats, TableCheck, WriteResult, format_count};

use super::output::{Output, Report};

/// Number of table names shown in verbose output.
const TABLE_SAMPLE: usize = 5;

/// Report data from type generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Output path for display.
    pub output: String,

    /// Generation method that produced the types.
    pub method: &'static str,

    /// Error from the primary method, when the fallback was used.
    pub primary_error: Option<String>,

    /// Whether a formatter was configured.
    pub format_enabled: bool,

    /// Whether the formatter ran successfully.
    pub formatted: bool,

    /// Statistics over the generated body.
    pub stats: ContentStats,

    /// Expected-table check.
    pub tables: TableCheck,

    /// Whether to include verbose details.
    pub verbose: bool,

    /// File written or preview.
    pub result: GenerationResult,
}

/// Result of type generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// The file was written to disk.
    Written(WriteResult),
    /// Dry-run preview of the full file content.
    Preview(String),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if self.verbose {
            out.key_value_indented("Method", self.method);
            if let Some(err) = &self.primary_error {
                out.key_value_indented("Primary method failed", err);
            }
        }
        if self.format_enabled && !self.formatted {
            out.warning("formatter failed, types are unformatted");
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, *written),
            GenerationResult::Preview(content) => self.render_preview(out, content),
        }

        self.render_table_check(out);
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: WriteResult) {
        out.success("Types generated successfully!");
        let file = match written {
            WriteResult::Created => format!("{} (created)", self.output),
            WriteResult::Overwritten => self.output.clone(),
        };
        out.key_value_indented("File", &file);
        out.key_value_indented("Lines", &format_count(self.stats.lines));

        if self.verbose && !self.stats.tables.is_empty() {
            out.key_value_indented("Tables found", &self.stats.tables.len().to_string());
            out.key_value_indented(
                "Sample",
                &format!("{}...", self.stats.sample(TABLE_SAMPLE).join(", ")),
            );
        }
    }

    fn render_preview(&self, out: &mut dyn Output, content: &str) {
        out.divider(&self.output);
        out.preformatted(content);
        out.divider("Summary");
        out.preformatted(&format!(
            "{} lines would be written to {}",
            format_count(self.stats.lines),
            self.output
        ));
    }

    fn render_table_check(&self, out: &mut dyn Output) {
        if self.tables.is_empty() {
            return;
        }

        out.newline();
        out.section("Expected tables");
        for table in &self.tables.found {
            out.added_item(table);
        }
        for table in &self.tables.missing {
            out.removed_item(&format!("{} (missing)", table));
        }
    }
}
