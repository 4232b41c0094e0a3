use super::{eval_str, evaluate, index_path, Array, Directive, ForFrame, Runtime, Val};
use crate::error;
use crate::lang::split::{is_identifier, split_print, split_top, unquote};
use crate::lang::{ast::Expression, parse, Command, Error, Rhs, Target};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

const ZONE_WIDTH: usize = 14;

/// BASIC statements.
impl Runtime {
    pub(super) fn r#let(&mut self, target: &Target, rhs: &Rhs) -> Result<Directive> {
        let value = match rhs {
            Rhs::Expr(expr) => evaluate(expr, &self.var)?,
            Rhs::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(evaluate(item, &self.var)?);
                }
                Val::Array(Array::from_vec(values))
            }
        };
        self.store_target(target, value)?;
        Ok(Directive::Continue)
    }

    pub(super) fn store_target(&mut self, target: &Target, value: Val) -> Result<()> {
        if target.index.is_empty() {
            self.var.store(&target.name, value);
        } else {
            let path = index_path(&target.index, &self.var)?;
            self.var.store_index(&target.name, &path, value);
        }
        Ok(())
    }

    pub(super) fn print(&mut self, args: &str) -> Result<Directive> {
        let items = split_print(args);
        let mut values = Vec::with_capacity(items.len());
        for (item, sep) in &items {
            let val = if item.is_empty() {
                None
            } else {
                Some(eval_str(item, &self.var)?)
            };
            values.push((val, *sep));
        }
        let mut line = std::mem::take(&mut self.pending);
        for (val, sep) in &values {
            if let Some(val) = val {
                line.push_str(&val.to_string());
            }
            if *sep == Some(',') {
                let width = line.chars().count();
                let pad = ZONE_WIDTH - width % ZONE_WIDTH;
                line.extend(std::iter::repeat(' ').take(pad));
            }
        }
        match values.last() {
            Some((_, Some(_))) => self.pending = line,
            _ => self.sink.emit(&line),
        }
        Ok(Directive::Continue)
    }

    pub(super) fn input(&mut self, args: &str) -> Result<Directive> {
        let (prompt, names) = self.input_prompt(args)?;
        let mut targets = vec![];
        for name in split_top(names, ',') {
            targets.push(Runtime::target(name)?);
        }
        if targets.is_empty() {
            return Err(error!(SyntaxError; "EXPECTED VARIABLE"));
        }
        let prompt = std::mem::take(&mut self.pending) + &prompt;
        let answer = self.input.request_input(&prompt);
        let parts: Vec<&str> = if targets.len() == 1 {
            vec![answer.as_str()]
        } else {
            answer.split(',').collect()
        };
        for (i, target) in targets.iter().enumerate() {
            let text = parts.get(i).copied().unwrap_or("");
            let value = if target.name.ends_with('$') {
                Val::String(text.trim().to_string())
            } else {
                Val::from_input(text)
            };
            self.store_target(target, value)?;
        }
        Ok(Directive::Continue)
    }

    fn input_prompt<'a>(&self, args: &'a str) -> Result<(String, &'a str)> {
        let args = args.trim();
        if !args.starts_with('"') {
            return Ok((self.config.input_prompt.clone(), args));
        }
        let close = match args[1..].find('"') {
            Some(close) => close + 1,
            None => return Err(error!(SyntaxError; "UNTERMINATED STRING")),
        };
        let prompt = args[1..close].to_string();
        let rest = args[close + 1..].trim_start();
        match rest.chars().next() {
            Some(';') => Ok((prompt, &rest[1..])),
            Some(',') => Ok((prompt, &rest[1..])),
            _ => Err(error!(SyntaxError; "EXPECTED ; AFTER PROMPT")),
        }
    }

    /// Parse an assignable name such as `X`, `N$` or `A(I, 2)`.
    pub(super) fn target(s: &str) -> Result<Target> {
        match parse(s)? {
            Expression::Var(name) => Ok(Target {
                name,
                index: vec![],
            }),
            Expression::Index(name, index) => Ok(Target { name, index }),
            _ => Err(error!(SyntaxError; format!("EXPECTED VARIABLE, GOT {}", s))),
        }
    }

    pub(super) fn r#if(
        &mut self,
        cond: &str,
        then: &str,
        otherwise: Option<&str>,
        index: Option<usize>,
        gate: Option<bool>,
    ) -> Result<Directive> {
        let clause = if self.truthy(cond) {
            then
        } else {
            match otherwise {
                Some(clause) => clause,
                None => return Ok(Directive::Continue),
            }
        };
        let clause = clause.trim();
        if !clause.is_empty() && clause.chars().all(|c| c.is_ascii_digit()) {
            return self.goto(clause);
        }
        self.dispatch_clause(clause, index, gate)
    }

    pub(super) fn r#for(
        &mut self,
        var: &str,
        from: &str,
        to: &str,
        step: Option<&str>,
        index: Option<usize>,
    ) -> Result<Directive> {
        let start = i64::try_from(&eval_str(from, &self.var)?)?;
        let end = i64::try_from(&eval_str(to, &self.var)?)?;
        let step = match step {
            Some(step) => i64::try_from(&eval_str(step, &self.var)?)?,
            None => 1,
        };
        if step == 0 {
            return Err(error!(IllegalFunctionCall; "STEP 0"));
        }
        self.var.store(var, Val::Integer(start));
        let frame = ForFrame {
            var: var.to_string(),
            end,
            step,
            for_line: index,
        };
        if frame.continues(start) {
            self.flow.push_for(frame)?;
            return Ok(Directive::Continue);
        }
        match index {
            Some(index) => Ok(Directive::Jump(self.after_next(index, var))),
            None => Ok(Directive::Continue),
        }
    }

    /// Index just past the NEXT that closes the FOR at `index`.
    fn after_next(&self, index: usize, var: &str) -> usize {
        let mut depth = 0;
        let mut i = index + 1;
        while let Some(line) = self.program.get(i) {
            match line.command() {
                Command::For(..) => depth += 1,
                Command::Next(name) => {
                    if depth == 0 && name.as_deref().map_or(true, |n| n == var) {
                        return i + 1;
                    }
                    if depth > 0 {
                        depth -= 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        self.program.len()
    }

    pub(super) fn goto(&mut self, target: &str) -> Result<Directive> {
        Ok(Directive::Jump(self.program.resolve(target)?))
    }

    /// In direct mode the return address is the end of the program.
    pub(super) fn gosub(&mut self, target: &str, index: Option<usize>) -> Result<Directive> {
        let to = self.program.resolve(target)?;
        let return_to = match index {
            Some(index) => index + 1,
            None => self.program.len(),
        };
        self.flow.gosub(return_to)?;
        Ok(Directive::Jump(to))
    }

    pub(super) fn r#return(&mut self) -> Directive {
        match self.flow.r#return() {
            Some(index) => Directive::Jump(index),
            None => Directive::Continue,
        }
    }

    /// Arrays are sparse, so the sizes are only checked.
    pub(super) fn dim(&mut self, args: &str) -> Result<Directive> {
        for item in split_top(args, ',') {
            let open = item.find(|c: char| c == '(' || c == '[');
            let name = match open {
                Some(open) => item[..open].trim(),
                None => item,
            };
            if !is_identifier(name) {
                return Err(error!(SyntaxError; format!("BAD ARRAY NAME {}", unquote(name))));
            }
            if open.is_some() {
                let target = Runtime::target(item)?;
                index_path(&target.index, &self.var)?;
            }
            self.var.dimension(name);
        }
        Ok(Directive::Continue)
    }
}
