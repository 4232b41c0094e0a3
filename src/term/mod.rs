extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::sink::{Graphic, Input, Sink, Sound};
use crate::mach::{Config, Runtime};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, trace};

/// Messages from the interpreter thread to the terminal.
enum Output {
    Text(String),
    Diagnostic(String),
    Bell,
    Prompt(String),
    Ready,
}

struct ChannelSink(Sender<Output>);

impl Sink for ChannelSink {
    fn emit(&mut self, text: &str) {
        let _ = self.0.send(Output::Text(text.to_string()));
    }

    fn emit_diagnostic(&mut self, text: &str) {
        let _ = self.0.send(Output::Diagnostic(text.to_string()));
    }

    fn emit_graphics(&mut self, graphic: &Graphic) {
        trace!(?graphic, "no canvas");
    }

    fn emit_sound(&mut self, sound: &Sound) {
        match sound {
            Sound::Beep => {
                let _ = self.0.send(Output::Bell);
            }
            _ => trace!(?sound, "no audio"),
        }
    }
}

/// Asks the terminal thread for a line and waits for the answer.
struct ChannelInput {
    prompts: Sender<Output>,
    answers: Receiver<String>,
}

impl Input for ChannelInput {
    fn request_input(&mut self, prompt: &str) -> String {
        if self.prompts.send(Output::Prompt(prompt.to_string())).is_err() {
            return String::new();
        }
        self.answers.recv().unwrap_or_default()
    }
}

struct StdinInput;

impl Input for StdinInput {
    fn request_input(&mut self, prompt: &str) -> String {
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
        let mut s = String::new();
        match std::io::stdin().lock().read_line(&mut s) {
            Ok(_) => s.trim_end_matches(&['\r', '\n'][..]).to_string(),
            Err(_) => String::new(),
        }
    }
}

pub fn main(config: Config, program: Option<PathBuf>, run: bool) {
    let result = if run {
        batch(config, program)
    } else {
        interactive(config, program)
    };
    if let Err(error) = result {
        eprintln!("{}", error);
    }
}

fn on_interrupt(flag: Arc<AtomicBool>) {
    if let Err(error) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        error!(%error, "Error setting Ctrl-C handler");
    }
}

fn load_command(path: &PathBuf) -> String {
    format!("LOAD \"{}\"", path.display())
}

fn batch(config: Config, program: Option<PathBuf>) -> std::io::Result<()> {
    let mut runtime = Runtime::new(config);
    runtime.set_input(StdinInput);
    on_interrupt(runtime.interrupt_handle());
    if let Some(path) = program {
        runtime.enter(&load_command(&path));
    }
    runtime.enter("RUN");
    runtime.run();
    Ok(())
}

fn interactive(config: Config, program: Option<PathBuf>) -> std::io::Result<()> {
    let interface = Interface::new("unibasic")?;
    interface.set_report_signal(Signal::Interrupt, true);

    let (out_tx, out_rx) = channel();
    let (line_tx, line_rx) = channel();
    let (answer_tx, answer_rx) = channel();
    let mut runtime = Runtime::new(config);
    runtime.set_output(ChannelSink(out_tx.clone()));
    runtime.set_input(ChannelInput {
        prompts: out_tx.clone(),
        answers: answer_rx,
    });
    let interrupt = runtime.interrupt_handle();
    on_interrupt(interrupt.clone());
    let worker = thread::spawn(move || worker(runtime, line_rx, out_tx));

    let mut alive = true;
    if let Some(path) = program {
        alive = line_tx.send(load_command(&path)).is_ok()
            && drain(&interface, &out_rx, &answer_tx, &interrupt)?;
    }
    interface.write_fmt(format_args!("READY.\n"))?;
    while alive {
        interface.set_prompt("> ")?;
        let line = match interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(Signal::Interrupt) => {
                interface.set_buffer("")?;
                continue;
            }
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if !line.trim().is_empty() {
            interface.add_history_unique(line.clone());
        }
        alive = line_tx.send(line).is_ok() && drain(&interface, &out_rx, &answer_tx, &interrupt)?;
    }
    drop(line_tx);
    if worker.join().is_err() {
        error!("interpreter thread panicked");
    }
    Ok(())
}

/// The interpreter thread: one entered line at a time, run to completion.
fn worker(mut runtime: Runtime, lines: Receiver<String>, out: Sender<Output>) {
    for line in lines {
        runtime.enter(&line);
        runtime.run();
        if out.send(Output::Ready).is_err() {
            break;
        }
    }
    debug!("interpreter thread finished");
}

/// Print interpreter output until it reports ready. False when the
/// interpreter thread has gone away.
fn drain(
    interface: &Interface<DefaultTerminal>,
    out: &Receiver<Output>,
    answers: &Sender<String>,
    interrupt: &AtomicBool,
) -> std::io::Result<bool> {
    loop {
        let output = match out.recv() {
            Ok(output) => output,
            Err(_) => return Ok(false),
        };
        match output {
            Output::Text(s) => interface.write_fmt(format_args!("{}\n", s))?,
            Output::Diagnostic(s) => {
                interface.write_fmt(format_args!("{}\n", Style::new().bold().paint(s)))?
            }
            Output::Bell => interface.write_fmt(format_args!("\x07"))?,
            Output::Prompt(prompt) => {
                interface.set_prompt(&prompt)?;
                let answer = match interface.read_line()? {
                    ReadResult::Input(answer) => answer,
                    ReadResult::Signal(Signal::Interrupt) => {
                        interface.set_buffer("")?;
                        interrupt.store(true, Ordering::SeqCst);
                        String::new()
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => String::new(),
                };
                if answers.send(answer).is_err() {
                    return Ok(false);
                }
            }
            Output::Ready => return Ok(true),
        }
    }
}
