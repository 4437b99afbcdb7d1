use std::io::{self, Write};

/// Where PRN and PRA emissions go. The machine never touches the console
/// itself, so a host can capture output instead of printing it.
pub trait OutputSink {
    /// PRN: a register value, printed as a decimal integer.
    fn print_value(&mut self, value:u8);
    /// PRA: a register value, printed as the character with that code point.
    fn print_char(&mut self, c:char);
}

pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn print_value(&mut self, value:u8) {
        println!("{}", value);
    }

    fn print_char(&mut self, c:char) {
        print!("{}", c);
        let _ = io::stdout().flush();
    }
}

/// Collects emissions into a string, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    pub text: String,
}

impl CapturedOutput {
    pub fn new() -> CapturedOutput {
        CapturedOutput { text: String::new() }
    }
}

impl OutputSink for CapturedOutput {
    fn print_value(&mut self, value:u8) {
        self.text.push_str(&value.to_string());
        self.text.push('\n');
    }

    fn print_char(&mut self, c:char) {
        self.text.push(c);
    }
}
