use super::sink::{Graphic, Sound};
use super::{eval_str, Directive, Runtime, Val, RESULT};
use crate::error;
use crate::lang::split::{leading_word, split_top, unquote};
use crate::lang::{Command, Conditioner, Error, Pilot, PilotOp};
use rand::Rng;
use std::convert::TryFrom;
use std::path::PathBuf;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// PILOT commands.
impl Runtime {
    pub(super) fn pilot(
        &mut self,
        pilot: &Pilot,
        index: Option<usize>,
        gate: Option<bool>,
    ) -> Result<Directive> {
        let run = match &pilot.cond {
            Conditioner::Always => true,
            Conditioner::Yes => self.flow.matched(),
            Conditioner::No => !self.flow.matched(),
            Conditioner::Expr(cond) => self.truthy(cond),
        };
        if !run {
            return Ok(Directive::Continue);
        }
        let text = pilot.text.as_str();
        match pilot.op {
            PilotOp::Type => {
                if gate != Some(false) {
                    let line = self.interpolate(text);
                    self.emit(&line);
                }
                Ok(Directive::Continue)
            }
            PilotOp::Accept => self.accept(text),
            // Both set the flag to the truth of the condition.
            PilotOp::Yes | PilotOp::No => {
                let matched = self.truthy(text);
                self.flow.set_match(matched);
                Ok(Directive::Continue)
            }
            PilotOp::Jump => self.goto(text),
            PilotOp::Match => {
                if gate != Some(false) && self.flow.matched() {
                    self.goto(text)
                } else {
                    Ok(Directive::Continue)
                }
            }
            PilotOp::MatchText => self.match_text(text),
            PilotOp::Compute => {
                if text.is_empty() {
                    return Ok(self.r#return());
                }
                self.compute(text)
            }
            PilotOp::Use => match Command::parse(text) {
                Command::Assign(target, rhs) => self.r#let(&target, &rhs),
                _ => self.gosub(text, index),
            },
            PilotOp::End => Ok(Directive::End),
            PilotOp::Label => Ok(Directive::Continue),
            PilotOp::Runtime => self.pilot_runtime(text),
            PilotOp::File => self.pilot_file(text),
            PilotOp::Web => self.pilot_web(text),
            PilotOp::Database => self.pilot_database(text),
            PilotOp::Str => self.pilot_string(text),
            PilotOp::DateTime => self.pilot_datetime(text),
            PilotOp::Game => self.pilot_game(text),
            PilotOp::Audio => self.pilot_audio(text),
            PilotOp::Math => {
                let val = eval_str(text, &self.var)?;
                self.var.store_result(val);
                Ok(Directive::Continue)
            }
            PilotOp::Branch => self.branch(text),
            PilotOp::Multimedia => {
                let (action, rest) = leading_word(text);
                self.sink.emit_graphics(&Graphic::Media {
                    action: action.to_ascii_uppercase(),
                    path: unquote(rest).to_string(),
                });
                Ok(Directive::Continue)
            }
            PilotOp::Storage => self.pilot_storage(text),
        }
    }

    /// Replace `$NAME` and `*NAME*` with variable values. Unknown names
    /// are left as written.
    pub(super) fn interpolate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find(|c: char| c == '$' || c == '*') {
            out.push_str(&rest[..pos]);
            let marker = &rest[pos..pos + 1];
            let after = &rest[pos + 1..];
            let len = after
                .char_indices()
                .find(|(i, c)| {
                    !(c.is_ascii_alphabetic() || *c == '_' || (*i > 0 && c.is_ascii_digit()))
                })
                .map(|(i, _)| i)
                .unwrap_or_else(|| after.len());
            let name = &after[..len];
            let (value, consumed) = if marker == "*" {
                if after[len..].starts_with('*') {
                    (self.var.get(name), len + 1)
                } else {
                    (None, 0)
                }
            } else {
                let dollar = format!("{}$", name);
                match self.var.get(&dollar) {
                    Some(val) if after[len..].starts_with('$') => (Some(val), len + 1),
                    _ => (self.var.get(name), len),
                }
            };
            match value {
                Some(val) if !name.is_empty() => {
                    out.push_str(&val.to_string());
                    rest = &after[consumed..];
                }
                _ => {
                    out.push_str(marker);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn accept(&mut self, name: &str) -> Result<Directive> {
        let prompt = std::mem::take(&mut self.pending) + &self.config.input_prompt;
        let answer = self.input.request_input(&prompt);
        if !name.is_empty() {
            let target = Runtime::target(name)?;
            let value = if target.name.ends_with('$') {
                Val::String(answer.trim().to_string())
            } else {
                Val::from_input(&answer)
            };
            self.store_target(&target, value)?;
        }
        self.var.store("ANSWER", Val::String(answer.trim().to_string()));
        Ok(Directive::Continue)
    }

    fn match_text(&mut self, patterns: &str) -> Result<Directive> {
        let answer = match self.var.get("ANSWER") {
            Some(val) => val.to_string().to_lowercase(),
            None => String::new(),
        };
        let found = split_top(patterns, ',')
            .into_iter()
            .map(|p| unquote(p).to_lowercase())
            .position(|p| !p.is_empty() && answer.contains(&p));
        self.flow.set_match(found.is_some());
        self.var
            .store_result(Val::Integer(found.map_or(0, |i| i as i64 + 1)));
        Ok(Directive::Continue)
    }

    fn compute(&mut self, text: &str) -> Result<Directive> {
        match Command::parse(text) {
            Command::Assign(target, rhs) => self.r#let(&target, &rhs),
            _ => {
                let val = eval_str(text, &self.var)?;
                self.var.store_result(val);
                Ok(Directive::Continue)
            }
        }
    }

    fn branch(&mut self, text: &str) -> Result<Directive> {
        let parts = split_top(text, ',');
        let (cond, yes, no) = match parts.as_slice() {
            [cond, yes] => (*cond, *yes, None),
            [cond, yes, no] => (*cond, *yes, Some(*no)),
            _ => return Err(error!(SyntaxError; "BRANCH:cond,label[,label]")),
        };
        if self.truthy(cond) {
            self.goto(yes)
        } else {
            match no {
                Some(no) => self.goto(no),
                None => Ok(Directive::Continue),
            }
        }
    }

    fn pilot_runtime(&mut self, text: &str) -> Result<Directive> {
        match text.trim().to_ascii_uppercase().as_str() {
            "CLEAR" => self.var.clear(),
            "VARS" => {
                let lines: Vec<String> = self
                    .var
                    .iter()
                    .map(|(name, val)| format!("{} = {}", name, val))
                    .collect();
                for line in lines {
                    self.emit(&line);
                }
            }
            _ => debug!(text, "runtime remark"),
        }
        Ok(Directive::Continue)
    }

    fn pilot_file(&mut self, text: &str) -> Result<Directive> {
        let (op, rest) = leading_word(text);
        match op.to_ascii_uppercase().as_str() {
            "WRITE" | "APPEND" => {
                let (path, body) = pair(rest)?;
                let mut body = self.interpolate(unquote(body));
                body.push('\n');
                if op.eq_ignore_ascii_case("WRITE") {
                    std::fs::write(unquote(path), body)?;
                } else {
                    use std::io::Write;
                    std::fs::OpenOptions::new()
                        .append(true)
                        .create(true)
                        .open(unquote(path))?
                        .write_all(body.as_bytes())?;
                }
            }
            "READ" => {
                let (path, name) = pair(rest)?;
                let body = std::fs::read_to_string(unquote(path))?;
                let val = Val::String(body.trim_end_matches(&['\r', '\n'][..]).to_string());
                self.store_named(name, val)?;
            }
            "EXISTS" => {
                let exists = PathBuf::from(unquote(rest)).exists();
                self.var.store_result(Val::from_bool(exists));
            }
            "DELETE" => std::fs::remove_file(unquote(rest))?,
            _ => return Err(error!(SyntaxError; format!("UNKNOWN F: OPERATION {}", op))),
        }
        Ok(Directive::Continue)
    }

    fn pilot_web(&mut self, text: &str) -> Result<Directive> {
        let (op, rest) = leading_word(text);
        if !op.eq_ignore_ascii_case("GET") {
            return Err(error!(SyntaxError; format!("UNKNOWN W: OPERATION {}", op)));
        }
        let parts = split_top(rest, ',');
        let url = match parts.first() {
            Some(url) => unquote(url).to_string(),
            None => return Err(error!(SyntaxError; "EXPECTED URL")),
        };
        debug!(%url, "web get");
        let body = reqwest::blocking::get(&url)
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| error!(NetworkError; e.to_string()))?;
        match parts.get(1) {
            Some(name) => self.store_named(name, Val::String(body))?,
            None => self.var.store_result(Val::String(body)),
        }
        Ok(Directive::Continue)
    }

    fn pilot_database(&mut self, text: &str) -> Result<Directive> {
        let (op, rest) = leading_word(text);
        match op.to_ascii_uppercase().as_str() {
            "SET" => {
                let (key, value) = pair(rest)?;
                let value = match eval_str(value, &self.var) {
                    Ok(value) => value,
                    Err(_) => Val::String(unquote(value).to_string()),
                };
                self.database.insert(unquote(key).to_string(), value);
            }
            "GET" => {
                let (key, name) = pair(rest)?;
                let value = self
                    .database
                    .get(unquote(key))
                    .cloned()
                    .unwrap_or_else(|| Val::String(String::new()));
                self.store_named(name, value)?;
            }
            "DEL" => {
                self.database.remove(unquote(rest));
            }
            "CLEAR" => self.database.clear(),
            "COUNT" => {
                let count = self.database.len() as i64;
                self.var.store_result(Val::Integer(count));
            }
            _ => return Err(error!(SyntaxError; format!("UNKNOWN D: OPERATION {}", op))),
        }
        Ok(Directive::Continue)
    }

    fn pilot_string(&mut self, text: &str) -> Result<Directive> {
        let (op, name) = leading_word(text);
        let s = self.var.fetch(name)?.to_string();
        let val = match op.to_ascii_uppercase().as_str() {
            "UPPER" => Val::String(s.to_uppercase()),
            "LOWER" => Val::String(s.to_lowercase()),
            "TRIM" => Val::String(s.trim().to_string()),
            "REVERSE" => Val::String(s.chars().rev().collect()),
            "LEN" => {
                self.var.store_result(Val::Integer(s.chars().count() as i64));
                return Ok(Directive::Continue);
            }
            _ => return Err(error!(SyntaxError; format!("UNKNOWN S: OPERATION {}", op))),
        };
        self.var.store(name, val.clone());
        self.var.store_result(val);
        Ok(Directive::Continue)
    }

    fn pilot_datetime(&mut self, text: &str) -> Result<Directive> {
        use chrono::{Datelike, Timelike};
        let (op, name) = leading_word(text);
        let now = chrono::Local::now();
        let val = match op.to_ascii_uppercase().as_str() {
            "" | "NOW" => Val::String(now.format("%Y-%m-%d %H:%M:%S").to_string()),
            "DATE" => Val::String(now.format("%Y-%m-%d").to_string()),
            "TIME" => Val::String(now.format("%H:%M:%S").to_string()),
            "YEAR" => Val::Integer(now.year() as i64),
            "MONTH" => Val::Integer(now.month() as i64),
            "DAY" => Val::Integer(now.day() as i64),
            "HOUR" => Val::Integer(now.hour() as i64),
            "MINUTE" => Val::Integer(now.minute() as i64),
            "SECOND" => Val::Integer(now.second() as i64),
            _ => return Err(error!(SyntaxError; format!("UNKNOWN DT: OPERATION {}", op))),
        };
        if name.is_empty() {
            self.var.store_result(val);
        } else {
            self.store_named(name, val)?;
        }
        Ok(Directive::Continue)
    }

    fn pilot_game(&mut self, text: &str) -> Result<Directive> {
        let (op, rest) = leading_word(text);
        match op.to_ascii_uppercase().as_str() {
            "DICE" => {
                let sides = match rest {
                    "" => 6,
                    n => i64::try_from(&eval_str(n, &self.var)?)?,
                };
                if sides < 1 {
                    return Err(error!(IllegalFunctionCall; "DICE NEEDS A SIDE"));
                }
                let roll = self.rng.gen_range(1..=sides);
                self.var.store_result(Val::Integer(roll));
            }
            "SCORE" => {
                let delta = match rest {
                    "" => Val::Integer(0),
                    n => eval_str(n, &self.var)?,
                };
                let score = self.var.get("SCORE").cloned().unwrap_or_default();
                let score = super::Operation::sum(score, delta)?;
                self.var.store("SCORE", score.clone());
                self.var.store_result(score);
            }
            "SHUFFLE" => {
                let rng = &mut self.rng;
                self.var.array_mut(rest)?.shuffle(rng);
            }
            "RESET" => self.var.store("SCORE", Val::Integer(0)),
            _ => return Err(error!(SyntaxError; format!("UNKNOWN GAME: OPERATION {}", op))),
        }
        Ok(Directive::Continue)
    }

    fn pilot_audio(&mut self, text: &str) -> Result<Directive> {
        let (op, rest) = leading_word(text);
        let sound = match op.to_ascii_uppercase().as_str() {
            "BEEP" => Sound::Beep,
            "PLAY" => Sound::Play(unquote(rest).to_string()),
            "TONE" => {
                let (frequency, millis) = pair(rest)?;
                Sound::Tone {
                    frequency: f64::try_from(&eval_str(frequency, &self.var)?)?,
                    millis: millis_of(&eval_str(millis, &self.var)?)?,
                }
            }
            _ => return Err(error!(SyntaxError; format!("UNKNOWN AUDIO: OPERATION {}", op))),
        };
        self.sink.emit_sound(&sound);
        Ok(Directive::Continue)
    }

    fn pilot_storage(&mut self, text: &str) -> Result<Directive> {
        let (op, rest) = leading_word(text);
        let (key, name) = pair(rest)?;
        let key = unquote(key);
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(error!(SyntaxError; format!("BAD STORAGE KEY {}", key)));
        }
        let path = self.config.storage_dir.join(format!("{}.txt", key));
        match op.to_ascii_uppercase().as_str() {
            "SAVE" => {
                let value = self.var.fetch(name)?;
                std::fs::create_dir_all(&self.config.storage_dir)?;
                std::fs::write(&path, value.to_string())?;
            }
            "LOAD" => {
                let text = std::fs::read_to_string(&path)?;
                self.store_named(name, Val::from_input(&text))?;
            }
            _ => return Err(error!(SyntaxError; format!("UNKNOWN STORAGE: OPERATION {}", op))),
        }
        Ok(Directive::Continue)
    }

    /// Store into a named variable and into RESULT.
    fn store_named(&mut self, name: &str, val: Val) -> Result<()> {
        let target = Runtime::target(name)?;
        self.store_target(&target, val.clone())?;
        self.var.store(RESULT, val);
        Ok(())
    }
}

fn pair(s: &str) -> Result<(&str, &str)> {
    let parts = split_top(s, ',');
    match parts.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(error!(SyntaxError; "EXPECTED TWO ARGUMENTS")),
    }
}

pub(super) fn millis_of(val: &Val) -> Result<u64> {
    let n = i64::try_from(val)?;
    if n < 0 {
        return Err(error!(IllegalFunctionCall; "NEGATIVE DURATION"));
    }
    Ok(n as u64)
}
