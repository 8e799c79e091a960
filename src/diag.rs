use std::cell::Cell;

/// Collects and renders diagnostic events. One ephemeral engine exists for
/// driver planning; each job constructs its own.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Cell<usize>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, message: &str) {
        self.errors.set(self.errors.get() + 1);
        eprintln!("error: {message}");
    }

    /// Report an error with the offending command line as a snippet.
    pub fn report_command(&self, message: &str, command: &str, label: &str) {
        self.errors.set(self.errors.get() + 1);
        eprintln!(
            "{}",
            chic::Error::new(message)
                .error(1, 0, command.len(), command, label)
                .to_string()
        );
    }

    pub fn error_count(&self) -> usize {
        self.errors.get()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.get() > 0
    }
}
