use crate::mach::sink::Capture;
use crate::mach::{Config, Event, Runtime};

mod for_test;

fn runtime() -> (Runtime, Capture) {
    let config = Config {
        seed: Some(1),
        ..Config::default()
    };
    let mut r = Runtime::new(config);
    let capture = Capture::new();
    r.set_output(capture.clone());
    (r, capture)
}

fn run(runtime: &mut Runtime, capture: &Capture) -> String {
    run_cycles(runtime, capture, 5000)
}

fn run_cycles(runtime: &mut Runtime, capture: &Capture, cycles: usize) -> String {
    let event = runtime.execute(cycles);
    let mut s = capture.take_text();
    if event == Event::Running {
        s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
    }
    s
}
