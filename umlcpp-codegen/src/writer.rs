//! Indent-tracking line buffer.

/// Accumulates output lines at the current indentation level.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    unit: String,
    level: usize,
    lines: Vec<String>,
}

impl CodeWriter {
    /// Creates an empty writer using `unit` for each indentation level.
    #[must_use]
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            level: 0,
            lines: Vec::new(),
        }
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation level.
    pub fn outdent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Appends text, one output line per embedded line.
    ///
    /// Each non-empty line is prefixed with the current indentation.
    pub fn write_line(&mut self, text: &str) {
        let prefix = self.unit.repeat(self.level);
        for line in text.split('\n') {
            if line.is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines.push(format!("{prefix}{line}"));
            }
        }
    }

    /// Appends an empty line.
    pub fn blank_line(&mut self) {
        self.lines.push(String::new());
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the accumulated text, newline terminated.
    #[must_use]
    pub fn into_string(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
