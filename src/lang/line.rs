use super::{Command, LineNumber};

/// One line of source: an optional line number, the text after it and
/// the command it classifies as.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: LineNumber,
    source: String,
    command: Command,
}

impl Line {
    pub fn new(s: &str) -> Line {
        let s = s.trim();
        let digits = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or_else(|| s.len());
        let number = match s[..digits].parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => None,
        };
        let source = match number {
            Some(_) => s[digits..].trim(),
            None => s,
        };
        Line {
            number,
            source: source.to_string(),
            command: Command::parse(source),
        }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn is_direct(&self) -> bool {
        self.number.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.number {
            Some(number) => write!(f, "{} {}", number, self.source),
            None => write!(f, "{}", self.source),
        }
    }
}
