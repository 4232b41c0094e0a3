#![allow(dead_code)]
use unibasic::mach::sink::{Capture, Scripted};
use unibasic::mach::{Config, Event, Runtime};

pub fn runtime() -> (Runtime, Capture) {
    runtime_with(Config {
        seed: Some(7),
        ..Config::default()
    })
}

pub fn runtime_with(config: Config) -> (Runtime, Capture) {
    let mut r = Runtime::new(config);
    let capture = Capture::new();
    r.set_output(capture.clone());
    (r, capture)
}

pub fn answers(r: &mut Runtime, answers: &[&str]) {
    r.set_input(Scripted::new(answers.iter().copied()));
}

pub fn exec(runtime: &mut Runtime, capture: &Capture) -> String {
    exec_n(runtime, capture, 5000)
}

pub fn exec_n(runtime: &mut Runtime, capture: &Capture, cycles: usize) -> String {
    let mut s = String::new();
    if runtime.execute(cycles) == Event::Running {
        s.push_str(&capture.take_text());
        s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
        return s;
    }
    s.push_str(&capture.take_text());
    s
}

/// Enter each line, then run.
pub fn program(runtime: &mut Runtime, capture: &Capture, lines: &[&str]) -> String {
    for line in lines {
        runtime.enter(line);
    }
    runtime.enter("RUN");
    exec(runtime, capture)
}
