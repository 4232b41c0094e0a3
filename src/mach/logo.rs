use super::sink::Graphic;
use super::{eval_str, Directive, Runtime, Val};
use crate::error;
use crate::lang::split::{logo_tokens, split_top, unbracket, unquote};
use crate::lang::{Error, Turtle};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

const MAX_NESTING: usize = 64;

/// Turtle graphics, REPEAT and macros.
impl Runtime {
    pub(super) fn turtle_verb(&mut self, verb: Turtle, args: &str) -> Result<Directive> {
        match verb {
            Turtle::Forward => {
                let [d] = self.numbers::<1>(args)?;
                self.step(d);
            }
            Turtle::Back => {
                let [d] = self.numbers::<1>(args)?;
                self.step(-d);
            }
            Turtle::Left => {
                let [a] = self.numbers::<1>(args)?;
                self.turtle.turn(-a);
            }
            Turtle::Right => {
                let [a] = self.numbers::<1>(args)?;
                self.turtle.turn(a);
            }
            Turtle::PenUp => self.turtle.pen_down = false,
            Turtle::PenDown => self.turtle.pen_down = true,
            Turtle::ClearScreen => {
                self.turtle.reset();
                self.sink.emit_graphics(&Graphic::Clear);
                let sprite = self.turtle.sprite();
                self.sink.emit_graphics(&sprite);
            }
            Turtle::Home => {
                self.turtle.home();
                let sprite = self.turtle.sprite();
                self.sink.emit_graphics(&sprite);
            }
            Turtle::SetXY => {
                let [x, y] = self.numbers::<2>(args)?;
                if let Some(line) = self.turtle.move_to((x, y)) {
                    self.sink.emit_graphics(&line);
                }
            }
            Turtle::SetColor => self.turtle.color = self.text_arg(args),
            Turtle::SetPenSize => {
                let [w] = self.numbers::<1>(args)?;
                if w <= 0.0 {
                    return Err(error!(IllegalFunctionCall; "PEN SIZE"));
                }
                self.turtle.width = w;
            }
            Turtle::Circle => {
                let [radius] = self.numbers::<1>(args)?;
                self.sink.emit_graphics(&Graphic::Circle {
                    center: self.turtle.position(),
                    radius,
                    color: self.turtle.color.clone(),
                });
            }
            Turtle::Dot => self.sink.emit_graphics(&Graphic::Dot {
                at: self.turtle.position(),
                color: self.turtle.color.clone(),
                width: self.turtle.width,
            }),
            Turtle::Rect => {
                let [width, height] = self.numbers::<2>(args)?;
                self.sink.emit_graphics(&Graphic::Rect {
                    at: self.turtle.position(),
                    width,
                    height,
                    color: self.turtle.color.clone(),
                });
            }
            Turtle::Text => {
                let text = self.text_arg(args);
                self.sink.emit_graphics(&Graphic::Text {
                    at: self.turtle.position(),
                    text,
                    color: self.turtle.color.clone(),
                });
            }
            Turtle::ShowTurtle | Turtle::HideTurtle => {
                self.turtle.visible = verb == Turtle::ShowTurtle;
                let sprite = self.turtle.sprite();
                self.sink.emit_graphics(&sprite);
            }
        }
        Ok(Directive::Continue)
    }

    fn step(&mut self, distance: f64) {
        if let Some(line) = self.turtle.forward(distance) {
            self.sink.emit_graphics(&line);
        }
    }

    /// Exactly `N` numeric arguments, separated by commas or spaces.
    /// A single argument may be any expression.
    pub(super) fn numbers<const N: usize>(&self, args: &str) -> Result<[f64; N]> {
        let pieces = if N == 1 || split_top(args, ',').len() > 1 {
            split_top(args, ',')
        } else {
            logo_tokens(args)
        };
        if pieces.len() != N {
            return Err(error!(SyntaxError; format!("EXPECTED {} NUMBERS", N)));
        }
        let mut out = [0.0; N];
        for (slot, piece) in out.iter_mut().zip(pieces) {
            *slot = f64::try_from(&eval_str(piece, &self.var)?)?;
        }
        Ok(out)
    }

    /// A string expression, or the raw text when it does not evaluate.
    pub(super) fn text_arg(&self, args: &str) -> String {
        match eval_str(args, &self.var) {
            Ok(Val::String(s)) => s,
            _ => unquote(args).to_string(),
        }
    }

    pub(super) fn repeat(
        &mut self,
        count: &str,
        body: &str,
        index: Option<usize>,
    ) -> Result<Directive> {
        let count = i64::try_from(&eval_str(count, &self.var)?)?;
        for n in 1..=count {
            self.var.store("REPCOUNT", Val::Integer(n));
            match self.sequence(body, index)? {
                Directive::Continue => {}
                directive => return Ok(directive),
            }
        }
        Ok(Directive::Continue)
    }

    pub(super) fn call(&mut self, name: &str, index: Option<usize>) -> Result<Directive> {
        let body = match self.macros.get(&name.trim().to_ascii_uppercase()) {
            Some(body) => body.clone(),
            None => return Err(error!(UndefinedMacro; name.trim())),
        };
        self.sequence(&body, index)
    }

    pub(super) fn define(&mut self, name: &str, body: &str) {
        self.macros
            .insert(name.to_ascii_uppercase(), body.to_string());
    }

    /// Run a Logo command sequence. A body that does not start with a
    /// Logo word runs as a single command.
    fn sequence(&mut self, body: &str, index: Option<usize>) -> Result<Directive> {
        if self.nesting >= MAX_NESTING {
            return Err(error!(OutOfMemory; "NESTING TOO DEEP"));
        }
        self.nesting += 1;
        let result = self.sequence_inner(body, index);
        self.nesting -= 1;
        result
    }

    fn sequence_inner(&mut self, body: &str, index: Option<usize>) -> Result<Directive> {
        let tokens = logo_tokens(body);
        let first = match tokens.first() {
            Some(first) => first.to_ascii_uppercase(),
            None => return Ok(Directive::Continue),
        };
        if !self.is_logo_word(&first) {
            return self.dispatch_clause(body, index, None);
        }
        let mut i = 0;
        while i < tokens.len() {
            let word = tokens[i].to_ascii_uppercase();
            let (directive, used) = if word == "REPEAT" {
                let args = inputs(&tokens, i, 2, &word)?;
                (self.repeat(args[0], unbracket(args[1]), index)?, 3)
            } else if word == "CALL" {
                let args = inputs(&tokens, i, 1, &word)?;
                (self.call(args[0], index)?, 2)
            } else if let Some(verb) = Turtle::from_word(&word) {
                let arity = verb.arity();
                let args = inputs(&tokens, i, arity, &word)?.join(" ");
                (self.turtle_verb(verb, &args)?, 1 + arity)
            } else if self.macros.contains_key(&word) {
                (self.call(&word, index)?, 1)
            } else {
                return Err(error!(UnknownCommand; tokens[i]));
            };
            if directive != Directive::Continue {
                return Ok(directive);
            }
            i += used;
        }
        Ok(Directive::Continue)
    }

    fn is_logo_word(&self, word: &str) -> bool {
        word == "REPEAT"
            || word == "CALL"
            || Turtle::from_word(word).is_some()
            || self.macros.contains_key(word)
    }
}

fn inputs<'a, 'b>(tokens: &'b [&'a str], at: usize, n: usize, word: &str) -> Result<&'b [&'a str]> {
    match tokens.get(at + 1..at + 1 + n) {
        Some(args) => Ok(args),
        None => Err(error!(SyntaxError; format!("NOT ENOUGH INPUTS TO {}", word))),
    }
}

#[cfg(test)]
mod tests {
    use super::super::sink::Capture;
    use super::*;

    #[test]
    fn test_numbers_accepts_commas_or_spaces() {
        let r = Runtime::default();
        assert_eq!(r.numbers::<2>("10, 20").unwrap(), [10.0, 20.0]);
        assert_eq!(r.numbers::<2>("10 -5").unwrap(), [10.0, -5.0]);
        assert!(r.numbers::<1>("").is_err());
    }

    #[test]
    fn test_sequence_consumes_arity() {
        let mut r = Runtime::default();
        let capture = Capture::new();
        r.set_output(capture.clone());
        r.sequence("PU FD 10 PD RT 90 FD 5", None).unwrap();
        assert_eq!(r.turtle.position(), (5.0, 10.0));
        assert_eq!(capture.take_graphics().len(), 1);
    }
}
