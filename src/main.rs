/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! A small binary for poking each reporting function from the shell (or from
//! a test harness that wants to watch a child process die).
//!
//! Anything after the command is joined with spaces and becomes the message.
//! If a command ever returns, "returned" is printed to standard output.
use errfns::Errno;
use errfns::{
    cmd_line_err, err_exit, err_exit_en, err_exit_now, err_msg, fatal,
    usage_err,
};
use std::ffi::{CString, OsString};

const USAGE: &str = "errfns [--errno N] [--stdout TEXT] [--c-stdout TEXT] COMMAND [WORDS...]

Commands:
    msg WORDS          report errno and WORDS, then return
    open PATH          try to open PATH, reporting failure without exiting
    exit WORDS         report errno and WORDS, then exit
    exit-now WORDS     report errno and WORDS, then _exit without flushing
    exit-en N WORDS    report error number N and WORDS, then exit
    fatal WORDS        report WORDS, then exit
    usage WORDS        report a usage error, then exit
    cmdline WORDS      report a bad argument value, then exit
";

fn parse_errnum(text: &str) -> libc::c_int {
    match text.parse() {
        Ok(errnum) => errnum,
        Err(_) => cmd_line_err!("not an error number: '%s'", text),
    }
}

fn utf8(arg: OsString) -> String {
    match arg.into_string() {
        Ok(arg) => arg,
        Err(arg) => {
            cmd_line_err!("argument is not valid UTF-8: '%s'", arg.to_string_lossy())
        }
    }
}

/// Leave `text` sitting in C stdio's buffer rather than Rust's.
fn c_print(text: &str) {
    let c_text = match CString::new(text) {
        Ok(c_text) => c_text,
        Err(_) => cmd_line_err!("text contains a NUL byte: '%s'", text),
    };
    unsafe { libc::printf(b"%s\0".as_ptr() as *const libc::c_char, c_text.as_ptr()) };
}

fn open(path: &str) {
    let c_path = match CString::new(path) {
        Ok(c_path) => c_path,
        Err(_) => cmd_line_err!("path contains a NUL byte: '%s'", path),
    };

    let fd = unsafe { libc::open(c_path.as_ptr(), libc::O_RDONLY) };
    if fd == -1 {
        err_msg!("cannot open %s", path);
        return;
    }
    unsafe { libc::close(fd) };
}

fn main() {
    let mut args = std::env::args_os().skip(1).map(utf8).peekable();

    let mut ambient = None;
    let mut pending_stdout = None;
    let mut pending_c_stdout = None;
    loop {
        match args.peek().map(String::as_str) {
            Some("--errno") => {
                args.next();
                let value = args.next().unwrap_or_else(|| usage_err!("%s", USAGE));
                ambient = Some(parse_errnum(&value));
            }
            Some("--stdout") => {
                args.next();
                pending_stdout =
                    Some(args.next().unwrap_or_else(|| usage_err!("%s", USAGE)));
            }
            Some("--c-stdout") => {
                args.next();
                pending_c_stdout =
                    Some(args.next().unwrap_or_else(|| usage_err!("%s", USAGE)));
            }
            _ => break,
        }
    }

    let command = args.next().unwrap_or_else(|| usage_err!("%s", USAGE));
    let mut words: Vec<String> = args.collect();

    let explicit = match command.as_str() {
        "exit-en" if words.is_empty() => usage_err!("%s", USAGE),
        "exit-en" => Some(parse_errnum(&words.remove(0))),
        _ => None,
    };
    let message = words.join(" ");

    if let Some(text) = pending_stdout {
        print!("{}", text);
    }
    if let Some(text) = pending_c_stdout {
        c_print(&text);
    }

    // Last thing before the command, so nothing else gets a chance to
    // overwrite it.
    if let Some(errnum) = ambient {
        Errno(errnum).set();
    }

    match command.as_str() {
        "msg" => err_msg!("%s", message),
        "open" => open(&message),
        "exit" => err_exit!("%s", message),
        "exit-now" => err_exit_now!("%s", message),
        "exit-en" => err_exit_en!(explicit.unwrap_or_default(), "%s", message),
        "fatal" => fatal!("%s", message),
        "usage" => usage_err!("%s", message),
        "cmdline" => cmd_line_err!("%s", message),
        other => usage_err!("unknown command '%s'\n%s", other, USAGE),
    }

    println!("returned");
}
