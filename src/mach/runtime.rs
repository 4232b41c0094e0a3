use super::sink::{Input, NoInput, Sink, Stdout};
use super::{Config, Directive, Files, Flow, Program, Turtle, Val, Var};
use crate::error;
use crate::lang::split::{leading_word, unquote};
use crate::lang::{Command, Error, ErrorKind, Line, LineNumber};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

type Result<T> = std::result::Result<T, Error>;

/// ## Virtual machine

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Running,
    Stopped,
}

pub struct Runtime {
    pub(super) config: Config,
    pub(super) program: Program,
    pub(super) var: Var,
    pub(super) flow: Flow,
    pub(super) turtle: Turtle,
    pub(super) files: Files,
    pub(super) macros: HashMap<String, String>,
    pub(super) database: HashMap<String, Val>,
    pub(super) sink: Box<dyn Sink + Send>,
    pub(super) input: Box<dyn Input + Send>,
    pub(super) rng: StdRng,
    pub(super) pending: String,
    pub(super) nesting: usize,
    pc: Option<usize>,
    current: Option<usize>,
    interrupt: Arc<AtomicBool>,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new(Config::default())
    }
}

impl Runtime {
    pub fn new(config: Config) -> Runtime {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Runtime {
            flow: Flow::new(config.stack_limit),
            config,
            program: Program::new(),
            var: Var::new(),
            turtle: Turtle::default(),
            files: Files::new(),
            macros: HashMap::new(),
            database: HashMap::new(),
            sink: Box::new(Stdout),
            input: Box::new(NoInput),
            rng,
            pending: String::new(),
            nesting: 0,
            pc: None,
            current: None,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_output<S: Sink + Send + 'static>(&mut self, sink: S) {
        self.sink = Box::new(sink);
    }

    pub fn set_input<I: Input + Send + 'static>(&mut self, input: I) {
        self.input = Box::new(input);
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn var_mut(&mut self) -> &mut Var {
        &mut self.var
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn is_running(&self) -> bool {
        self.pc.is_some()
    }

    /// Flag another thread can set to stop a run between statements.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::SeqCst);
    }

    /// Accept one line from the user. Numbered lines edit the program,
    /// anything else executes immediately.
    pub fn enter(&mut self, s: &str) {
        let line = Line::new(s);
        if !line.is_direct() {
            self.program.insert(line);
            return;
        }
        match self.driver_command(line.source()) {
            Some(Ok(())) => return,
            Some(Err(error)) => {
                self.diagnose(error);
                return;
            }
            None => {}
        }
        match self.execute_command(line.command(), None) {
            Directive::Jump(index) => {
                trace!(to = index, "direct jump");
                self.pc = Some(index);
            }
            Directive::Continue | Directive::End => {
                if self.pc.is_none() {
                    self.flush();
                }
            }
        }
    }

    /// Classify and execute one line of source as a direct command.
    pub fn execute_line(&mut self, line: &str) -> Directive {
        self.execute_command(&Command::parse(line), None)
    }

    /// Execute a classified command. Errors become diagnostics and the
    /// command continues.
    pub fn execute_command(&mut self, command: &Command, index: Option<usize>) -> Directive {
        let gate = self.flow.take_sentinel();
        debug!(line = ?self.line_number(index), ?command, "dispatch");
        match self.dispatch(command, index, gate) {
            Ok(directive) => directive,
            Err(error) => {
                let line_number = self.line_number(index);
                self.diagnose(error.in_line_number(line_number));
                Directive::Continue
            }
        }
    }

    /// Run at most `cycles` program statements.
    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            if self.interrupt.swap(false, Ordering::SeqCst) && self.pc.is_some() {
                let line_number = self.line_number(self.current);
                self.stop();
                self.diagnose(error!(Break, line_number));
                return Event::Stopped;
            }
            let index = match self.pc {
                Some(index) => index,
                None => return Event::Stopped,
            };
            let command = match self.program.get(index) {
                Some(line) => line.command().clone(),
                None => {
                    self.stop();
                    return Event::Stopped;
                }
            };
            self.current = Some(index);
            self.pc = match self.execute_command(&command, Some(index)) {
                Directive::Continue => Some(index + 1),
                Directive::End => None,
                Directive::Jump(to) => {
                    trace!(from = index, to, "jump");
                    Some(to)
                }
            };
            if self.pc.is_none() {
                self.stop();
                return Event::Stopped;
            }
        }
        Event::Running
    }

    /// Execute until the program stops.
    pub fn run(&mut self) {
        while self.execute(self.config.cycles) == Event::Running {}
    }

    pub(super) fn line_number(&self, index: Option<usize>) -> LineNumber {
        index
            .and_then(|index| self.program.get(index))
            .and_then(|line| line.number())
    }

    fn stop(&mut self) {
        self.pc = None;
        self.current = None;
        self.flush();
    }

    fn driver_command(&mut self, source: &str) -> Option<Result<()>> {
        let (word, rest) = leading_word(source);
        let word = word.to_ascii_uppercase();
        let idle = rest.is_empty();
        let path = !idle && !rest.starts_with('=');
        match word.as_str() {
            "RUN" if rest.chars().all(|c| c.is_ascii_digit()) => Some(self.start_run(rest)),
            "LIST" if idle => {
                self.list();
                Some(Ok(()))
            }
            "NEW" if idle => {
                self.new_program();
                Some(Ok(()))
            }
            "CLEAR" if idle => {
                self.var.clear();
                Some(Ok(()))
            }
            "LOAD" if path => Some(self.load(unquote(rest))),
            "SAVE" if path => Some(self.save(unquote(rest))),
            _ => None,
        }
    }

    fn start_run(&mut self, from: &str) -> Result<()> {
        let start = match from.parse::<u32>() {
            Ok(number) => self
                .program
                .index_of_line(number)
                .ok_or_else(|| error!(UndefinedLine; from))?,
            Err(_) => 0,
        };
        self.var.clear();
        self.flow.clear();
        self.files.close_all();
        debug!(start, lines = self.program.len(), "run");
        self.pc = Some(start);
        Ok(())
    }

    fn list(&mut self) {
        self.flush();
        for line in self.program.lines() {
            self.sink.emit(&line.to_string());
        }
    }

    fn new_program(&mut self) {
        self.program.clear();
        self.var.clear();
        self.flow.clear();
        self.files.close_all();
        self.macros.clear();
        self.pc = None;
        self.current = None;
    }

    fn load(&mut self, path: &str) -> Result<()> {
        let program = Program::load(path)?;
        debug!(path, lines = program.len(), "loaded");
        self.new_program();
        self.program = program;
        Ok(())
    }

    fn save(&mut self, path: &str) -> Result<()> {
        self.program.save(path)?;
        debug!(path, lines = self.program.len(), "saved");
        Ok(())
    }

    fn dispatch(
        &mut self,
        command: &Command,
        index: Option<usize>,
        gate: Option<bool>,
    ) -> Result<Directive> {
        match command {
            Command::Nop => Ok(Directive::Continue),
            Command::Assign(target, rhs) => self.r#let(target, rhs),
            Command::Pilot(pilot) => self.pilot(pilot, index, gate),
            Command::Print(args) => self.print(args),
            Command::Input(args) => self.input(args),
            Command::If(cond, then, otherwise) => {
                self.r#if(cond, then, otherwise.as_deref(), index, gate)
            }
            Command::For(var, from, to, step) => {
                self.r#for(var, from, to, step.as_deref(), index)
            }
            Command::Next(name) => self.flow.next(name.as_deref(), &mut self.var),
            Command::Goto(target) => self.goto(target),
            Command::Gosub(target) => self.gosub(target, index),
            Command::Return => Ok(self.r#return()),
            Command::Dim(args) => self.dim(args),
            Command::End => Ok(Directive::End),
            Command::Turtle(verb, args) => self.turtle_verb(*verb, args),
            Command::Repeat(count, body) => self.repeat(count, body, index),
            Command::Define(name, body) => {
                self.define(name, body);
                Ok(Directive::Continue)
            }
            Command::Call(name) => self.call(name, index),
            Command::Builtin(builtin, args) => self.builtin(*builtin, args),
            Command::Unknown(source) => Err(error!(UnknownCommand; source.as_str())),
            Command::Invalid(error) => Err(error.clone()),
        }
    }

    /// Dispatch a clause of a larger command, such as the THEN part of an IF.
    pub(super) fn dispatch_clause(
        &mut self,
        source: &str,
        index: Option<usize>,
        gate: Option<bool>,
    ) -> Result<Directive> {
        let command = Command::parse(source);
        self.dispatch(&command, index, gate)
    }

    /// Send a line of text, completing any line PRINT left open.
    pub(super) fn emit(&mut self, text: &str) {
        let mut line = std::mem::take(&mut self.pending);
        line.push_str(text);
        self.sink.emit(&line);
    }

    pub(super) fn flush(&mut self) {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.sink.emit(&line);
        }
    }

    fn diagnose(&mut self, error: Error) {
        warn!(code = ?error.code(), line = ?error.line_number(), "{}", error);
        if error.kind() == ErrorKind::Io {
            self.var.store("EOF", Val::Integer(1));
        }
        self.flush();
        let text = format!("{}{}", self.config.diagnostic_prefix, error);
        self.sink.emit_diagnostic(&text);
    }

    /// Truth of a condition. Anything that fails to evaluate is false,
    /// except the bare words `true` and `1`.
    pub(super) fn truthy(&self, cond: &str) -> bool {
        match super::eval_str(cond, &self.var) {
            Ok(val) => val.is_truthy(),
            Err(error) => {
                debug!(cond, %error, "condition failed");
                Val::String(cond.to_string()).is_truthy()
            }
        }
    }
}
