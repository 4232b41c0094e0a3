use super::*;

#[test]
fn test_breaking_out_of_loop_with_goto() {
    let (mut r, c) = runtime();
    r.enter("10 FOR Y = 1 TO 2");
    r.enter("20 FOR X = 8 TO 9");
    r.enter("30 PRINT Y; X");
    r.enter("40 GOTO 60");
    r.enter("50 NEXT X");
    r.enter("60 NEXT Y");
    r.enter("RUN");
    assert_eq!(run(&mut r, &c), "18\n28\n");
    assert_eq!(r.flow().for_depth(), 1);
}

#[test]
fn test_loop_count_and_final_value() {
    let (mut r, c) = runtime();
    r.enter("10 N = 0");
    r.enter("20 FOR I = 10 TO 1 STEP -3");
    r.enter("30 N = N + 1");
    r.enter("40 NEXT I");
    r.enter("50 PRINT N; \" \"; I");
    r.enter("RUN");
    assert_eq!(run(&mut r, &c), "4 -2\n");
}

#[test]
fn test_zero_iterations_skips_body() {
    let (mut r, c) = runtime();
    r.enter("10 FOR I = 3 TO 1");
    r.enter("20 PRINT \"BODY\"");
    r.enter("30 FOR J = 1 TO 2");
    r.enter("40 NEXT J");
    r.enter("50 NEXT I");
    r.enter("60 PRINT \"DONE\"; I");
    r.enter("RUN");
    assert_eq!(run(&mut r, &c), "DONE3\n");
}

#[test]
fn test_next_without_for_continues() {
    let (mut r, c) = runtime();
    r.enter("10 NEXT");
    r.enter("20 PRINT \"AFTER\"");
    r.enter("RUN");
    assert_eq!(run(&mut r, &c), "?NEXT without FOR in 10\nAFTER\n");
}

#[test]
fn test_nested_loops() {
    let (mut r, c) = runtime();
    r.enter("10 FOR I = 1 TO 2");
    r.enter("20 FOR J = 1 TO 2");
    r.enter("30 PRINT I; J;");
    r.enter("40 NEXT J");
    r.enter("50 NEXT I");
    r.enter("60 PRINT");
    r.enter("RUN");
    assert_eq!(run(&mut r, &c), "11122122\n");
}

#[test]
fn test_for_frame_replaced_on_reentry() {
    let (mut r, c) = runtime();
    r.enter("10 K = 0");
    r.enter("20 FOR I = 1 TO 2");
    r.enter("30 K = K + 1");
    r.enter("40 IF K < 3 THEN 20");
    r.enter("50 NEXT I");
    r.enter("60 PRINT K");
    r.enter("RUN");
    assert_eq!(run(&mut r, &c), "4\n");
    assert_eq!(r.flow().for_depth(), 0);
}

#[test]
fn test_infinite_loop_yields() {
    let (mut r, c) = runtime();
    r.enter("10 GOTO 10");
    r.enter("RUN");
    assert_eq!(r.execute(100), Event::Running);
    r.interrupt();
    assert_eq!(run(&mut r, &c), "?Break in 10\n");
}
