use crate::error;
use crate::lang::{Error, Line};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, Error>;

/// ## Stored program
///
/// Numbered lines in ascending order. The label table is rebuilt lazily
/// after any edit.

#[derive(Debug, Default)]
pub struct Program {
    lines: Vec<Line>,
    labels: Option<HashMap<String, usize>>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.labels = None;
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Insert a numbered line, replacing one with the same number.
    /// A number with no text deletes the line.
    pub fn insert(&mut self, line: Line) {
        let number = match line.number() {
            Some(number) => number,
            None => return,
        };
        self.labels = None;
        let pos = self
            .lines
            .binary_search_by_key(&number, |l| l.number().unwrap_or(0));
        match (pos, line.is_empty()) {
            (Ok(idx), true) => {
                self.lines.remove(idx);
            }
            (Ok(idx), false) => self.lines[idx] = line,
            (Err(_), true) => {}
            (Err(idx), false) => self.lines.insert(idx, line),
        }
    }

    pub fn index_of_line(&self, number: u32) -> Option<usize> {
        self.lines.iter().position(|l| l.number() == Some(number))
    }

    pub fn index_of_label(&mut self, label: &str) -> Option<usize> {
        let lines = &self.lines;
        let labels = self.labels.get_or_insert_with(|| {
            let mut labels = HashMap::new();
            for (idx, line) in lines.iter().enumerate() {
                if let Some(name) = line.command().label() {
                    labels.entry(name.to_string()).or_insert(idx);
                }
            }
            debug!(count = labels.len(), "label table built");
            labels
        });
        labels.get(label.trim()).copied()
    }

    /// Resolve a jump target: a label, or a line number when it is numeric.
    pub fn resolve(&mut self, target: &str) -> Result<usize> {
        let target = target.trim();
        if let Some(idx) = self.index_of_label(target) {
            return Ok(idx);
        }
        match target.parse::<u32>() {
            Ok(number) => self
                .index_of_line(number)
                .ok_or_else(|| error!(UndefinedLine; target)),
            Err(_) => Err(error!(UndefinedLabel; target)),
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    /// Lines without a number are skipped.
    pub fn from_text(text: &str) -> Program {
        let mut program = Program::new();
        for s in text.lines() {
            if s.trim().is_empty() {
                continue;
            }
            let line = Line::new(s);
            if line.is_direct() {
                warn!(line = s, "skipping unnumbered line");
                continue;
            }
            program.insert(line);
        }
        program
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Program> {
        let text = std::fs::read_to_string(path)?;
        Ok(Program::from_text(&text))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sorted_and_replace() {
        let mut p = Program::new();
        p.insert(Line::new("20 PRINT 2"));
        p.insert(Line::new("10 PRINT 1"));
        p.insert(Line::new("20 PRINT 3"));
        assert_eq!(p.to_text(), "10 PRINT 1\n20 PRINT 3\n");
        p.insert(Line::new("10"));
        assert_eq!(p.to_text(), "20 PRINT 3\n");
    }

    #[test]
    fn test_round_trip() {
        let text = "10 L:START\n20 T:Hello\n30 J:START\n";
        let mut p = Program::from_text(text);
        assert_eq!(p.to_text(), text);
        assert_eq!(p.index_of_label("START"), Some(0));
        assert_eq!(p.resolve("30").unwrap(), 2);
        assert!(p.resolve("NOWHERE").is_err());
    }

    #[test]
    fn test_labels_rebuilt_after_edit() {
        let mut p = Program::from_text("10 L:A\n");
        assert_eq!(p.index_of_label("A"), Some(0));
        p.insert(Line::new("5 L:B"));
        assert_eq!(p.index_of_label("A"), Some(1));
    }
}
