// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2024 Robert D. French

//! Run the `errfns` binary in a child process and watch what it leaves
//! behind: its exit status and whatever it wrote to stdout and stderr.
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{Command, Output};

fn errfns(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_errfns"))
        .args(args)
        .env_remove("EF_DUMPCORE")
        .current_dir(scratch_dir())
        .output()
        .expect("spawn errfns")
}

/// An empty directory to run in, so relative paths and core files land
/// somewhere harmless.
fn scratch_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("errfns-scratch");
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn err_msg_reports_and_returns() {
    let out = errfns(&["--errno", "13", "msg", "hello", "there"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stderr(&out), "ERROR [EACCES Permission denied] hello there\n");
    assert_eq!(stdout(&out), "returned\n");
}

#[test]
fn err_msg_on_a_missing_file() {
    let out = errfns(&["open", "config.txt"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stderr(&out).contains("cannot open config.txt"));
    assert!(stderr(&out).contains("[ENOENT No such file or directory]"));
    assert_eq!(stdout(&out), "returned\n");
}

#[test]
fn err_exit_reports_ambient_errno() {
    let out = errfns(&["--errno", "2", "exit", "boom"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "ERROR [ENOENT No such file or directory] boom\n");
    assert!(!stdout(&out).contains("returned"));
}

#[test]
fn err_exit_flushes_stdout() {
    let out = errfns(&["--stdout", "pending", "--errno", "2", "exit", "boom"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "pending");
}

#[test]
fn err_exit_now_leaves_stdout_unflushed() {
    let out = errfns(&["--stdout", "pending", "--errno", "2", "exit-now", "boom"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "");
    assert_eq!(stderr(&out), "ERROR [ENOENT No such file or directory] boom\n");
}

#[test]
fn c_stdio_is_flushed_before_the_report() {
    let out = errfns(&["--c-stdout", "pending", "--errno", "2", "exit", "boom"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "pending");

    // err_msg returns, so the flush has to happen before "returned" is
    // printed through Rust's own stdout
    let out = errfns(&["--c-stdout", "pending", "msg", "x"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "pendingreturned\n");
}

#[test]
fn err_exit_now_leaves_c_stdio_unflushed() {
    let out = errfns(&["--c-stdout", "pending", "--errno", "2", "exit-now", "boom"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "");
}

#[test]
fn err_exit_en_ignores_ambient_errno() {
    let out = errfns(&["--errno", "13", "exit-en", "2", "open", "failed"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("No such file or directory"));
    assert!(!err.contains("Permission denied"));
    assert!(err.ends_with("open failed\n"));
    assert!(!stdout(&out).contains("returned"));
}

#[test]
fn fatal_has_no_errno() {
    let out = errfns(&["--errno", "2", "fatal", "table", "is", "full"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "ERROR: table is full\n");
    assert!(!stdout(&out).contains("returned"));
}

#[test]
fn usage_err_exits_with_usage_status() {
    let out = errfns(&["usage", "usage: prog [-x] file"]);
    assert_eq!(out.status.code(), Some(64));
    assert_eq!(stderr(&out), "Usage: usage: prog [-x] file\n");
    assert!(!stdout(&out).contains("returned"));
}

#[test]
fn cmd_line_err_exits_with_its_own_status() {
    let out = errfns(&["cmdline", "bad", "value"]);
    assert_eq!(out.status.code(), Some(65));
    assert_eq!(stderr(&out), "Command-line usage error: bad value\n");
    assert!(!stdout(&out).contains("returned"));
}

#[test]
fn binary_reports_its_own_usage_errors() {
    let out = errfns(&[]);
    assert_eq!(out.status.code(), Some(64));
    assert!(stderr(&out).starts_with("Usage: errfns"));

    let out = errfns(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(64));
    assert!(stderr(&out).contains("unknown command 'frobnicate'"));

    let out = errfns(&["--errno", "lots", "msg", "x"]);
    assert_eq!(out.status.code(), Some(65));
    assert!(stderr(&out).contains("not an error number: 'lots'"));
}

#[test]
fn non_utf8_arguments_are_command_line_errors() {
    let out = Command::new(env!("CARGO_BIN_EXE_errfns"))
        .arg("msg")
        .arg(OsStr::from_bytes(b"caf\xe9"))
        .current_dir(scratch_dir())
        .output()
        .expect("spawn errfns");
    assert_eq!(out.status.code(), Some(65));
    assert_eq!(
        stderr(&out),
        "Command-line usage error: argument is not valid UTF-8: 'caf\u{fffd}'\n"
    );
    assert_eq!(stdout(&out), "");
}

#[test]
fn dumpcore_aborts_on_failure() {
    let out = Command::new(env!("CARGO_BIN_EXE_errfns"))
        .args(["fatal", "core", "please"])
        .env("EF_DUMPCORE", "1")
        .current_dir(scratch_dir())
        .output()
        .expect("spawn errfns");
    assert_eq!(out.status.code(), None);
    assert_eq!(out.status.signal(), Some(libc::SIGABRT));
    assert_eq!(stderr(&out), "ERROR: core please\n");
}

#[test]
fn dumpcore_does_not_apply_to_usage_errors() {
    let out = Command::new(env!("CARGO_BIN_EXE_errfns"))
        .args(["usage", "prog file"])
        .env("EF_DUMPCORE", "1")
        .current_dir(scratch_dir())
        .output()
        .expect("spawn errfns");
    assert_eq!(out.status.code(), Some(64));
}
