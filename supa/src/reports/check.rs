//! Check command report data structures.

use supatype_core::format_count;

use super::output::{Output, Report};

/// Freshness of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Output matches what the database generates.
    UpToDate,
    /// Output differs from what the database generates.
    Stale {
        existing_lines: usize,
        generated_lines: usize,
    },
    /// Output file does not exist.
    Missing,
    /// The formatter failed, so fresh types can't be compared with the
    /// formatted file on disk.
    Unformatted,
}

/// Report data from comparing the output file against fresh types.
#[derive(Debug)]
pub struct CheckReport {
    /// Output path for display.
    pub output: String,
    /// Command that regenerates the file.
    pub regenerate_command: String,
    pub status: CheckStatus,
}

impl CheckReport {
    /// Whether the check passed.
    pub fn is_up_to_date(&self) -> bool {
        self.status == CheckStatus::UpToDate
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        match self.status {
            CheckStatus::UpToDate => {
                out.success(&format!("{} is up to date", self.output));
                return;
            }
            CheckStatus::Stale {
                existing_lines,
                generated_lines,
            } => {
                out.warning(&format!("{} is out of date", self.output));
                out.key_value_indented("Existing lines", &format_count(existing_lines));
                out.key_value_indented("Generated lines", &format_count(generated_lines));
            }
            CheckStatus::Missing => {
                out.warning(&format!("{} does not exist", self.output));
            }
            CheckStatus::Unformatted => {
                out.warning(&format!(
                    "could not check {}: formatter failed",
                    self.output
                ));
                out.newline();
                out.preformatted("Fix the formatter or rerun with `--no-format`.");
                return;
            }
        }

        out.newline();
        out.preformatted(&format!("Run `{}` to regenerate.", self.regenerate_command));
    }
}
