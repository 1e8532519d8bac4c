use std::collections::VecDeque;
use std::io;

/// ## Where program and debugger text goes
///
/// The machine never touches stdin or stdout directly. Implementations
/// must make sure everything written is visible before `read_line` blocks.
pub trait Console {
    /// Writes `text`, followed by a newline when `newline` is set.
    fn write(&mut self, text: &str, newline: bool) -> io::Result<()>;

    /// Shows `prompt` and reads one line without its line terminator.
    /// `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Reports a fault or a failed command. Terminals may style it.
    fn error(&mut self, text: &str) -> io::Result<()> {
        self.write(text, true)
    }

    /// Remembers an interactive command for line editing.
    fn add_history(&mut self, _line: &str) {}
}

/// Ends every write with a newline. The debugger steps through programs
/// with this so output from `write` doesn't run into its own display.
pub struct LineConsole<'a> {
    inner: &'a mut dyn Console,
}

impl<'a> LineConsole<'a> {
    pub fn new(inner: &'a mut dyn Console) -> LineConsole<'a> {
        LineConsole { inner }
    }
}

impl Console for LineConsole<'_> {
    fn write(&mut self, text: &str, _newline: bool) -> io::Result<()> {
        self.inner.write(text, true)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.inner.read_line(prompt)
    }

    fn error(&mut self, text: &str) -> io::Result<()> {
        self.inner.error(text)
    }
}

/// An in-memory console fed from a script of input lines. Prompts are
/// recorded in the output the way a terminal would show them.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    input: VecDeque<String>,
    output: String,
}

impl Transcript {
    pub fn new(input: &[&str]) -> Transcript {
        Transcript {
            input: input.iter().map(|s| s.to_string()).collect(),
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Console for Transcript {
    fn write(&mut self, text: &str, newline: bool) -> io::Result<()> {
        self.output.push_str(text);
        if newline {
            self.output.push('\n');
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push_str(prompt);
        Ok(self.input.pop_front())
    }
}
