mod common;
use common::*;
use unibasic::mach::{Directive, Val};

#[test]
fn test_list_new_and_edit() {
    let (mut r, c) = runtime();
    r.enter("20 PRINT 2");
    r.enter("10 PRINT 1");
    r.enter("30 PRINT 3");
    r.enter("20 PRINT 22");
    r.enter("30");
    r.enter("LIST");
    assert_eq!(exec(&mut r, &c), "10 PRINT 1\n20 PRINT 22\n");
    r.enter("NEW");
    r.enter("LIST");
    assert_eq!(exec(&mut r, &c), "");
    assert!(r.program().is_empty());
}

#[test]
fn test_run_from_line() {
    let (mut r, c) = runtime();
    r.enter("10 PRINT 1");
    r.enter("20 PRINT 2");
    r.enter("RUN 20");
    assert_eq!(exec(&mut r, &c), "2\n");
    r.enter("RUN 99");
    assert_eq!(exec(&mut r, &c), "?Undefined line; 99\n");
}

#[test]
fn test_run_clears_variables() {
    let (mut r, c) = runtime();
    r.enter("X = 1");
    r.enter("10 END");
    r.enter("RUN");
    assert_eq!(exec(&mut r, &c), "");
    assert!(r.var().is_empty());
}

#[test]
fn test_clear() {
    let (mut r, _c) = runtime();
    r.enter("X = 1");
    r.enter("CLEAR");
    assert_eq!(r.var().get("X"), None);
}

#[test]
fn test_runaway_program() {
    let (mut r, c) = runtime();
    r.enter("10 GOTO 10");
    r.enter("RUN");
    assert_eq!(exec_n(&mut r, &c, 10), "\n10 Execution cycles exceeded.\n");
    assert!(r.is_running());
    r.interrupt();
    assert_eq!(exec(&mut r, &c), "?Break in 10\n");
    assert!(!r.is_running());
}

#[test]
fn test_interrupt_handle_from_another_thread() {
    let (mut r, c) = runtime();
    r.enter("10 GOTO 10");
    r.enter("RUN");
    let handle = r.interrupt_handle();
    std::thread::spawn(move || handle.store(true, std::sync::atomic::Ordering::SeqCst))
        .join()
        .unwrap();
    assert_eq!(exec(&mut r, &c), "?Break\n");
}

#[test]
fn test_execute_line_directives() {
    let (mut r, c) = runtime();
    r.enter("10 L: HERE");
    assert_eq!(r.execute_line("X = 3"), Directive::Continue);
    assert_eq!(r.var().get("X"), Some(&Val::Integer(3)));
    assert_eq!(r.execute_line("J: HERE"), Directive::Jump(0));
    assert_eq!(r.execute_line("E:"), Directive::End);
    assert_eq!(r.execute_line("GOTO 50"), Directive::Continue);
    assert_eq!(exec(&mut r, &c), "?Undefined line; 50\n");
}

#[test]
fn test_program_text_round_trip() {
    let (mut r, c) = runtime();
    r.program_mut()
        .insert(unibasic::lang::Line::new("10 PRINT \"a\";"));
    r.enter("20 PRINT \"b\"");
    assert_eq!(r.program().to_text(), "10 PRINT \"a\";\n20 PRINT \"b\"\n");
    r.enter("RUN");
    assert_eq!(exec(&mut r, &c), "ab\n");
}

#[test]
fn test_pending_print_flushed_at_end() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 PRINT \"no newline\";"]);
    assert_eq!(out, "no newline\n");
}

#[test]
fn test_pilot_type_completes_pending_line() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 PRINT \"Hi, \";", "20 T:there"]);
    assert_eq!(out, "Hi, there\n");
}

#[test]
fn test_gosub_nesting() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 GOSUB 100",
            "20 PRINT \"done\"",
            "30 END",
            "100 PRINT \"outer\"",
            "110 GOSUB 200",
            "120 RETURN",
            "200 PRINT \"inner\"",
            "210 RETURN",
        ],
    );
    assert_eq!(out, "outer\ninner\ndone\n");
}

#[test]
fn test_return_without_gosub_continues() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 RETURN", "20 PRINT 1"]);
    assert_eq!(out, "1\n");
}

#[test]
fn test_for_with_negative_step_and_skip() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 FOR I = 3 TO 1 STEP -1",
            "20 PRINT I;",
            "30 NEXT",
            "40 PRINT",
            "50 FOR J = 5 TO 1",
            "60 PRINT \"never\"",
            "70 NEXT J",
            "80 PRINT \"after\"",
        ],
    );
    assert_eq!(out, "321\nafter\n");
}

#[test]
fn test_step_zero() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 FOR I = 1 TO 3 STEP 0", "20 PRINT \"next\""]);
    assert_eq!(out, "?Illegal function call in 10; STEP 0\nnext\n");
}
