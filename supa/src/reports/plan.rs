//! Plan report, printed before the generator runs.

use super::output::{Output, Report};

/// What is about to be generated.
#[derive(Debug)]
pub struct PlanReport {
    pub project_id: String,
    pub schemas: Vec<String>,
    pub output: String,
    /// Env file for display (verbose only).
    pub env_file: String,
    /// Resolved CLI command (verbose only).
    pub cli: String,
    /// Whether a direct-connection fallback is available.
    pub has_fallback: bool,
    pub verbose: bool,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Generating Supabase TypeScript types...");
        out.key_value_indented("Project ID", &self.project_id);
        out.key_value_indented("Schemas", &self.schemas.join(", "));
        out.key_value_indented("Output", &self.output);

        if self.verbose {
            out.key_value_indented("Env file", &self.env_file);
            out.key_value_indented("CLI", &self.cli);
            let fallback = if self.has_fallback {
                "direct database connection"
            } else {
                "none"
            };
            out.key_value_indented("Fallback", fallback);
        }
    }
}
