//! Where command reports are written.

/// Sink for report lines.
///
/// Reports name the kind of each line. The sink picks the stream and the
/// decoration.
pub trait Output {
    /// Heading for the lines that follow.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// A file the command created.
    fn added_item(&mut self, text: &str);

    /// A diagnostic or skipped write.
    fn warning(&mut self, msg: &str);

    /// Labelled rule between per-file sections.
    fn divider(&mut self, label: &str);

    /// Text printed as given, such as rendered YAML.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// Result of a command, printed once the command finishes.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the terminal. Warnings go to stderr.
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
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", msg);
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
