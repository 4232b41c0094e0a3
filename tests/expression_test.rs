mod common;
use common::*;
use unibasic::mach::Val;

fn print(expr: &str) -> String {
    let (mut r, c) = runtime();
    r.enter(&format!("PRINT {}", expr));
    exec(&mut r, &c)
}

#[test]
fn test_arithmetic() {
    assert_eq!(print("2 + 3 * 4"), "14\n");
    assert_eq!(print("(2 + 3) * 4"), "20\n");
    assert_eq!(print("-3 + 1"), "-2\n");
    assert_eq!(print("10 MOD 4"), "2\n");
    assert_eq!(print("2 ^ 8"), "256\n");
}

#[test]
fn test_division_is_float() {
    assert_eq!(print("7 / 2"), "3.5\n");
    assert_eq!(print("6 / 2"), "3\n");
    let (mut r, _c) = runtime();
    r.enter("X = 6 / 2");
    assert_eq!(r.var().get("X"), Some(&Val::Float(3.0)));
}

#[test]
fn test_overflow_continues_in_float() {
    assert_eq!(print("9223372036854775807 + 1"), "9223372036854775808\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(print(r#""ab" + "cd""#), "abcd\n");
    assert_eq!(print(r#""n=" + 4"#), "n=4\n");
    assert_eq!(print(r#"1.5 + "x""#), "1.5x\n");
}

#[test]
fn test_comparisons() {
    assert_eq!(print("3 > 2"), "1\n");
    assert_eq!(print("3 <= 2"), "0\n");
    assert_eq!(print(r#""apple" < "banana""#), "1\n");
    assert_eq!(print("2 = 2.0"), "1\n");
    assert_eq!(print(r#""1" = 1"#), "0\n");
    assert_eq!(print(r#""1" <> 1"#), "1\n");
    assert_eq!(print(r#""a" < 1"#), "?Type mismatch\n");
}

#[test]
fn test_logic() {
    assert_eq!(print("1 AND 0"), "0\n");
    assert_eq!(print("1 OR 0"), "1\n");
    assert_eq!(print("NOT 0"), "1\n");
}

#[test]
fn test_unknown_identifiers_are_listed() {
    assert_eq!(print("Y + Z * Y"), "?Unknown identifier; Y, Z\n");
}

#[test]
fn test_error_in_program_names_line() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 PRINT 1 / 0", "20 PRINT 2"]);
    assert_eq!(out, "?Division by zero in 10\n2\n");
}

#[test]
fn test_syntax_error() {
    assert_eq!(print("1 +"), "?Syntax error; EXPECTED EXPRESSION\n");
}

#[test]
fn test_deep_nesting_is_diagnosed() {
    let deep = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(print(&deep), "?Out of memory; EXPRESSION TOO COMPLEX\n");
    let (mut r, c) = runtime();
    let line = format!("10 X = {}", deep);
    let out = program(&mut r, &c, &[line.as_str(), "20 PRINT \"after\""]);
    assert_eq!(out, "?Out of memory in 10; EXPRESSION TOO COMPLEX\nafter\n");
}
