use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

pub type Point = (f64, f64);

/// Drawing requests. Geometry is in turtle coordinates: origin at the
/// centre, y up.
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Line {
        from: Point,
        to: Point,
        color: String,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        color: String,
    },
    Dot {
        at: Point,
        color: String,
        width: f64,
    },
    Rect {
        at: Point,
        width: f64,
        height: f64,
        color: String,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        color: String,
    },
    Polygon {
        points: Vec<Point>,
        color: String,
    },
    Text {
        at: Point,
        text: String,
        color: String,
    },
    Fill(String),
    Clear,
    Turtle {
        at: Point,
        heading: f64,
        visible: bool,
    },
    Media {
        action: String,
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sound {
    Beep,
    Tone { frequency: f64, millis: u64 },
    Note { name: String, millis: u64 },
    Play(String),
}

/// Receiver of everything the interpreter shows.
pub trait Sink {
    /// One line of text, without the line terminator.
    fn emit(&mut self, text: &str);
    /// An error report, already prefixed.
    fn emit_diagnostic(&mut self, text: &str) {
        self.emit(text)
    }
    fn emit_graphics(&mut self, _graphic: &Graphic) {}
    fn emit_sound(&mut self, _sound: &Sound) {}
}

/// Supplier of user input for `A:` and `INPUT`.
pub trait Input {
    fn request_input(&mut self, prompt: &str) -> String;
}

/// Writes text to standard output and drops everything else.
#[derive(Debug, Default)]
pub struct Stdout;

impl Sink for Stdout {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Answers every request with an empty string.
#[derive(Debug, Default)]
pub struct NoInput;

impl Input for NoInput {
    fn request_input(&mut self, _prompt: &str) -> String {
        String::new()
    }
}

/// Pre-recorded answers, then empty strings.
#[derive(Debug, Default)]
pub struct Scripted(VecDeque<String>);

impl Scripted {
    pub fn new<I, S>(answers: I) -> Scripted
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scripted(answers.into_iter().map(Into::into).collect())
    }
}

impl Input for Scripted {
    fn request_input(&mut self, _prompt: &str) -> String {
        self.0.pop_front().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct Captured {
    text: String,
    graphics: Vec<Graphic>,
    sounds: Vec<Sound>,
}

/// Collects output in memory. Clones share the same buffer, so one
/// clone can be handed to the runtime and the other inspected.
#[derive(Debug, Default, Clone)]
pub struct Capture(Arc<Mutex<Captured>>);

impl Capture {
    pub fn new() -> Capture {
        Capture::default()
    }

    fn lock(&self) -> MutexGuard<'_, Captured> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drain captured text. Each emission ends with a newline.
    pub fn take_text(&self) -> String {
        std::mem::take(&mut self.lock().text)
    }

    pub fn take_graphics(&self) -> Vec<Graphic> {
        std::mem::take(&mut self.lock().graphics)
    }

    pub fn take_sounds(&self) -> Vec<Sound> {
        std::mem::take(&mut self.lock().sounds)
    }
}

impl Sink for Capture {
    fn emit(&mut self, text: &str) {
        let mut c = self.lock();
        c.text.push_str(text);
        c.text.push('\n');
    }

    fn emit_graphics(&mut self, graphic: &Graphic) {
        self.lock().graphics.push(graphic.clone());
    }

    fn emit_sound(&mut self, sound: &Sound) {
        self.lock().sounds.push(sound.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_shares_buffer() {
        let capture = Capture::new();
        let mut sink = capture.clone();
        sink.emit("one");
        sink.emit_sound(&Sound::Beep);
        assert_eq!(capture.take_text(), "one\n");
        assert_eq!(capture.take_text(), "");
        assert_eq!(capture.take_sounds(), vec![Sound::Beep]);
    }

    #[test]
    fn test_scripted() {
        let mut input = Scripted::new(vec!["a"]);
        assert_eq!(input.request_input("? "), "a");
        assert_eq!(input.request_input("? "), "");
    }
}
