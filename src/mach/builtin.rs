use super::files::Mode;
use super::pilot::millis_of;
use super::sink::{Graphic, Sound};
use super::{eval_str, Directive, Function, Runtime, Val, RESULT};
use crate::error;
use crate::lang::split::{is_identifier, split_top};
use crate::lang::{Builtin, Error};
use rand::Rng;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Keyword functions. Each leaves its value in RESULT.
impl Runtime {
    pub(super) fn builtin(&mut self, builtin: Builtin, args: &str) -> Result<Directive> {
        use Builtin as B;
        match builtin {
            B::Sort => self.var.array_mut(args.trim())?.sort(),
            B::Find => {
                let (name, needle) = match split_top(args, ',').as_slice() {
                    [name, needle] => (name.to_string(), eval_str(needle, &self.var)?),
                    _ => return Err(error!(SyntaxError; "FIND array, value")),
                };
                let found = self.var.array(&name)?.find(&needle);
                self.var
                    .store_result(Val::Integer(found.map_or(-1, |i| i as i64)));
            }
            B::Sum | B::Avg | B::Min | B::Max => {
                let values = self.aggregate_args(args)?;
                let val = match builtin {
                    B::Sum => Function::sum(&values)?,
                    B::Avg => Function::avg(&values)?,
                    B::Min => Function::min(&values)?,
                    _ => Function::max(&values)?,
                };
                self.var.store_result(val);
            }
            B::Line => {
                let [x1, y1, x2, y2] = self.numbers::<4>(args)?;
                self.sink.emit_graphics(&Graphic::Line {
                    from: (x1, y1),
                    to: (x2, y2),
                    color: self.turtle.color.clone(),
                    width: self.turtle.width,
                });
            }
            B::Box => {
                let [x, y, width, height] = self.numbers::<4>(args)?;
                self.sink.emit_graphics(&Graphic::Rect {
                    at: (x, y),
                    width,
                    height,
                    color: self.turtle.color.clone(),
                });
            }
            B::Triangle => {
                let [x1, y1, x2, y2, x3, y3] = self.numbers::<6>(args)?;
                self.sink.emit_graphics(&Graphic::Polygon {
                    points: vec![(x1, y1), (x2, y2), (x3, y3)],
                    color: self.turtle.color.clone(),
                });
            }
            B::Ellipse => {
                let [cx, cy, rx, ry] = self.numbers::<4>(args)?;
                self.sink.emit_graphics(&Graphic::Ellipse {
                    center: (cx, cy),
                    rx,
                    ry,
                    color: self.turtle.color.clone(),
                });
            }
            B::Fill => {
                let color = if args.trim().is_empty() {
                    self.turtle.color.clone()
                } else {
                    self.text_arg(args)
                };
                self.sink.emit_graphics(&Graphic::Fill(color));
            }
            B::Beep => self.sink.emit_sound(&Sound::Beep),
            B::Play => {
                let notes = self.text_arg(args);
                self.sink.emit_sound(&Sound::Play(notes));
            }
            B::Sound => {
                let [frequency, millis] = self.numbers::<2>(args)?;
                let millis = millis_of(&Val::Float(millis))?;
                self.sink.emit_sound(&Sound::Tone { frequency, millis });
            }
            B::Note => {
                let (name, millis) = match split_top(args, ',').as_slice() {
                    [name, millis] => (self.text_arg(name), eval_str(millis, &self.var)?),
                    _ => return Err(error!(SyntaxError; "NOTE name, duration")),
                };
                let millis = millis_of(&millis)?;
                self.sink.emit_sound(&Sound::Note { name, millis });
            }
            B::Open => self.open(args)?,
            B::Close => {
                if args.trim().is_empty() {
                    self.files.close_all();
                } else {
                    let number = self.handle(args)?;
                    self.files.close(number)?;
                }
            }
            B::Read => {
                let (number, name) = match split_top(args, ',').as_slice() {
                    [number, name] => (self.handle(number)?, Runtime::target(name)?),
                    _ => return Err(error!(SyntaxError; "READ handle, variable")),
                };
                let (val, eof) = match self.files.read_line(number)? {
                    Some(s) if name.name.ends_with('$') => (Val::String(s), false),
                    Some(s) => (Val::from_input(&s), false),
                    None => (Val::String(String::new()), true),
                };
                self.store_target(&name, val.clone())?;
                self.var.store(RESULT, val);
                self.var.store("EOF", Val::from_bool(eof));
            }
            B::Write => {
                let parts = split_top(args, ',');
                let (number, exprs) = match parts.split_first() {
                    Some((number, exprs)) => (self.handle(number)?, exprs),
                    None => return Err(error!(SyntaxError; "WRITE handle, values")),
                };
                let mut fields = Vec::with_capacity(exprs.len());
                for expr in exprs {
                    fields.push(eval_str(expr, &self.var)?.to_string());
                }
                self.files.write_line(number, &fields.join(","))?;
            }
            B::Eof => {
                let number = self.handle(args)?;
                let eof = Val::from_bool(self.files.eof(number)?);
                self.var.store("EOF", eof.clone());
                self.var.store_result(eof);
            }
            _ => {
                let mut values = vec![];
                for arg in split_top(args, ',') {
                    values.push(eval_str(arg, &self.var)?);
                }
                Function::check_arity(builtin, &values)?;
                let val = self.function(builtin, &values)?;
                self.var.store_result(val);
            }
        }
        Ok(Directive::Continue)
    }

    fn function(&mut self, builtin: Builtin, v: &[Val]) -> Result<Val> {
        use Builtin as B;
        match builtin {
            B::Sin => Function::sin(&v[0]),
            B::Cos => Function::cos(&v[0]),
            B::Tan => Function::tan(&v[0]),
            B::Sqrt => Function::sqrt(&v[0]),
            B::Abs => Function::abs(&v[0]),
            B::Int => Function::int(&v[0]),
            B::Rnd => match v.first() {
                None => Ok(Val::Float(self.rng.gen::<f64>())),
                Some(n) => {
                    let n = i64::try_from(n)?;
                    if n < 1 {
                        return Err(error!(IllegalFunctionCall; "RND RANGE"));
                    }
                    Ok(Val::Integer(self.rng.gen_range(1..=n)))
                }
            },
            B::Len => Function::len(&v[0]),
            B::Mid => Function::mid(&v[0], &v[1], v.get(2)),
            B::Left => Function::left(&v[0], &v[1]),
            B::Right => Function::right(&v[0], &v[1]),
            B::Instr => Function::instr(&v[0], &v[1]),
            B::Str => Function::str(&v[0]),
            B::Val => Function::val(&v[0]),
            B::Upper => Function::upper(&v[0]),
            B::Lower => Function::lower(&v[0]),
            _ => Err(error!(InternalError; format!("{:?}", builtin))),
        }
    }

    /// A lone array name aggregates its elements; otherwise each argument
    /// is a value.
    fn aggregate_args(&self, args: &str) -> Result<Vec<Val>> {
        let parts = split_top(args, ',');
        if let [name] = parts.as_slice() {
            if is_identifier(name) {
                if let Some(Val::Array(array)) = self.var.get(name) {
                    return Ok(array.values().cloned().collect());
                }
            }
        }
        let mut values = Vec::with_capacity(parts.len());
        for part in parts {
            values.push(eval_str(part, &self.var)?);
        }
        Ok(values)
    }

    fn open(&mut self, args: &str) -> Result<()> {
        let parts = split_top(args, ',');
        let (number, path, mode) = match parts.as_slice() {
            [number, path] => (*number, *path, None),
            [number, path, mode] => (*number, *path, Some(*mode)),
            _ => return Err(error!(SyntaxError; "OPEN handle, path[, mode]")),
        };
        let number = self.handle(number)?;
        let path = self.text_arg(path);
        let mode = match mode {
            Some(mode) => Mode::parse(&self.text_arg(mode))?,
            None => Mode::Read,
        };
        self.files.open(number, &path, mode)?;
        self.var.store("EOF", Val::Integer(0));
        Ok(())
    }

    fn handle(&self, s: &str) -> Result<i64> {
        let s = s.trim().trim_start_matches('#');
        i64::try_from(&eval_str(s, &self.var)?)
    }
}
