//! Translation run modes: copy, in place, and stdin to stdout.

use crate::prelude::*;

const CRLF_RULE: &str = r#""\r\n", "\n"
"#;

fn crlf_project() -> Project {
    let temp = Project::empty();
    temp.file("crlf.rule", CRLF_RULE);
    temp
}

/// > Each FILE is translated into FILE.ts; the source is untouched.
#[test]
fn copies_to_ts_suffix() {
    let temp = crlf_project();
    temp.file("a.txt", "one\r\ntwo\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule", "a.txt"])
        .passes();

    assert_eq!(temp.read("a.txt.ts"), b"one\ntwo\n");
    assert_eq!(temp.read("a.txt"), b"one\r\ntwo\r\n");
}

#[test]
fn translates_every_file_in_order() {
    let temp = crlf_project();
    temp.file("a.txt", "a\r\n");
    temp.file("b.txt", "b\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule", "a.txt", "b.txt"])
        .passes();

    assert_eq!(temp.read("a.txt.ts"), b"a\n");
    assert_eq!(temp.read("b.txt.ts"), b"b\n");
}

#[test]
fn suffix_flag_changes_destination() {
    let temp = crlf_project();
    temp.file("a.txt", "a\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["-s", ".unix", "./crlf.rule", "a.txt"])
        .passes();

    assert_eq!(temp.read("a.txt.unix"), b"a\n");
    assert!(!temp.exists("a.txt.ts"));
}

#[test]
fn empty_suffix_is_rejected() {
    let temp = crlf_project();
    temp.file("a.txt", "a\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["--suffix=", "./crlf.rule", "a.txt"])
        .exits(2);

    assert_eq!(temp.read("a.txt"), b"a\r\n");
}

/// > The output suffix only applies when copying, so filtering ignores it.
#[test]
fn empty_suffix_allowed_when_filtering() {
    let temp = crlf_project();
    temp.config("[output]\nsuffix = \"\"\n");

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule"])
        .stdin("a\r\n")
        .passes()
        .stdout_eq(b"a\n");

    bsed()
        .pwd(temp.path())
        .args(&["--suffix=", "./crlf.rule"])
        .stdin("b\r\n")
        .passes()
        .stdout_eq(b"b\n");
}

/// > Large filtered streams come through intact.
#[test]
fn filters_large_stdin() {
    let temp = crlf_project();
    let input = b"line\r\n".repeat(50_000);
    let expected = b"line\n".repeat(50_000);

    let out = bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule"])
        .stdin(input)
        .passes();

    assert_eq!(out.stdout_bytes(), &expected[..]);
}

/// > -r replaces each FILE with its translation.
#[test]
fn in_place_replaces_source() {
    let temp = crlf_project();
    temp.file("a.txt", "one\r\ntwo\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["-r", "./crlf.rule", "a.txt"])
        .passes();

    assert_eq!(temp.read("a.txt"), b"one\ntwo\n");
    assert!(!temp.exists("a.txt.ts"));
}

/// > With no FILE, stdin is translated to stdout.
#[test]
fn filters_stdin_to_stdout() {
    let temp = crlf_project();

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule"])
        .stdin("x\r\ny\r\n")
        .passes()
        .stdout_eq(b"x\ny\n");
}

#[test]
fn binary_bytes_pass_through() {
    let temp = Project::empty();
    temp.file("nul.rule", r#""\0", "\x7f""#);

    let out = bsed()
        .pwd(temp.path())
        .args(&["./nul.rule"])
        .stdin(vec![0xff, 0x00, 0xfe, 0x00])
        .passes();

    assert_eq!(out.stdout_bytes(), &[0xff, 0x7f, 0xfe, 0x7f]);
}

/// > A partial match at end of input is emitted verbatim.
#[test]
fn trailing_partial_match_is_flushed() {
    let temp = Project::empty();
    temp.file("ab.rule", r#""abc", "X""#);

    bsed()
        .pwd(temp.path())
        .args(&["./ab.rule"])
        .stdin("abcab")
        .passes()
        .stdout_eq(b"Xab");
}

#[test]
fn missing_input_file_is_io_error() {
    let temp = crlf_project();

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule", "missing.txt"])
        .exits(3)
        .stderr_has("missing.txt");
}

/// > The first failing file stops the run; earlier outputs remain.
#[test]
fn first_failure_stops_run() {
    let temp = crlf_project();
    temp.file("a.txt", "a\r\n");
    temp.file("c.txt", "c\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule", "a.txt", "missing.txt", "c.txt"])
        .exits(3);

    assert!(temp.exists("a.txt.ts"));
    assert!(!temp.exists("c.txt.ts"));
}

#[test]
fn verbose_announces_targets() {
    let temp = crlf_project();
    temp.file("a.txt", "a\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["-v", "./crlf.rule", "a.txt"])
        .passes()
        .stderr_has("[verbose] translate from `a.txt` to `a.txt.ts`");

    bsed()
        .pwd(temp.path())
        .args(&["-v", "-r", "./crlf.rule", "a.txt"])
        .passes()
        .stderr_has("[verbose] translate and replace locally `a.txt`");
}

#[test]
fn quiet_by_default() {
    let temp = crlf_project();
    temp.file("a.txt", "a\r\n");

    bsed()
        .pwd(temp.path())
        .args(&["./crlf.rule", "a.txt"])
        .passes()
        .stderr_lacks("[verbose]");
}
