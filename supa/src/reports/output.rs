//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Render a title/header.
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render an indented key-value pair.
    fn key_value_indented(&mut self, key: &str, value: &str);

    /// Render an added item (e.g., table found).
    fn added_item(&mut self, text: &str);

    /// Render a removed item (e.g., table missing).
    fn removed_item(&mut self, text: &str);

    /// Render a success message.
    fn success(&mut self, msg: &str);

    /// Render a warning message.
    fn warning(&mut self, msg: &str);

    /// Render a separator/divider with a label.
    fn divider(&mut self, label: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{}", text);
    }

    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        println!("   {}: {}", key, value);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn removed_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn divider(&mut self, label: &str) {
        println!("── {} ──", label);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Output that records rendered lines, for asserting on reports.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl RecordingOutput {
    pub fn render(report: &dyn Report) -> Vec<String> {
        let mut out = Self::default();
        report.render(&mut out);
        out.lines
    }
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn title(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.lines.push(format!("   {}: {}", key, value));
    }

    fn added_item(&mut self, text: &str) {
        self.lines.push(format!("  + {}", text));
    }

    fn removed_item(&mut self, text: &str) {
        self.lines.push(format!("  - {}", text));
    }

    fn success(&mut self, msg: &str) {
        self.lines.push(format!("✓ {}", msg));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {}", msg));
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("── {} ──", label));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
