use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

pub fn paint(tone: Tone, message: &str) -> ColoredString {
    match tone {
        Tone::Info => message.blue(),
        Tone::Success => message.green(),
        Tone::Warning => message.yellow().bold(),
        Tone::Error => message.red(),
    }
}
