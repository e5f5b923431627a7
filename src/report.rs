/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! The diagnostic functions themselves
//!
//! Each function takes pre-built [`fmt::Arguments`]. Most callers will want
//! the macros at the crate root instead, which accept C format strings and
//! build the arguments for you.
//!
//! Messages that involve an error number look like
//!
//! ```text
//! ERROR [ENOENT No such file or directory] cannot open config.txt
//! ```
//!
//! while [`fatal`] drops the bracketed part and the usage functions use their
//! own prefixes.

use crate::exit_status::ExitStatus;
use crate::posix::Errno;
use crate::terminate::{terminate, Mode};
use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::io::Write;

/// Report a failure without exiting.
///
/// The ambient errno is described alongside the message, and is left exactly
/// as it was found, so this can be followed by a call that inspects errno
/// again (such as [`err_exit`]).
pub fn err_msg(args: fmt::Arguments<'_>) {
    let saved = Errno::last();
    emit(&render_error(Some(saved), args), true);
    saved.set();
}

/// Report a failed system call and exit.
///
/// Like [`err_msg`], then exits with [`ExitStatus::Failure`]. Pending
/// standard output is flushed first, and exit handlers run.
pub fn err_exit(args: fmt::Arguments<'_>) -> ! {
    let errno = Errno::last();
    emit(&render_error(Some(errno), args), true);
    terminate(ExitStatus::Failure, Mode::Exit)
}

/// Report a failed call and leave via `_exit(2)`.
///
/// Unlike [`err_exit`], standard output is *not* flushed and exit handlers do
/// not run. Use this in a child after `fork(2)`, where flushing would emit a
/// second copy of whatever the parent had buffered, or from a thread that
/// must not run process-wide cleanup.
pub fn err_exit_now(args: fmt::Arguments<'_>) -> ! {
    let errno = Errno::last();
    emit(&render_error(Some(errno), args), false);
    terminate(ExitStatus::Failure, Mode::Immediate)
}

/// Report a failure whose error number was handed back explicitly, and exit.
///
/// The ambient errno is ignored. This suits APIs like the pthreads family
/// that return an error number rather than setting errno.
pub fn err_exit_en(errnum: libc::c_int, args: fmt::Arguments<'_>) -> ! {
    emit(&render_error(Some(Errno(errnum)), args), true);
    terminate(ExitStatus::Failure, Mode::Exit)
}

/// Report a failure that has nothing to do with errno, and exit.
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    emit(&render_error(None, args), true);
    terminate(ExitStatus::Failure, Mode::Exit)
}

/// Report a command-line syntax error and exit with [`ExitStatus::Usage`].
pub fn usage_err(args: fmt::Arguments<'_>) -> ! {
    emit(&render_prefixed("Usage: ", args), true);
    terminate(ExitStatus::Usage, Mode::Exit)
}

/// Report a bad command-line argument value and exit with
/// [`ExitStatus::CommandLine`].
pub fn cmd_line_err(args: fmt::Arguments<'_>) -> ! {
    emit(&render_prefixed("Command-line usage error: ", args), true);
    terminate(ExitStatus::CommandLine, Mode::Exit)
}

fn render_error(errno: Option<Errno>, args: fmt::Arguments<'_>) -> String {
    let mut line = String::from("ERROR");

    // Writing into a String only fails if a Display impl does; whatever made
    // it into the buffer by then still gets reported.
    match errno {
        Some(errno) => write!(line, " [{}] ", errno).ok(),
        None => write!(line, ": ").ok(),
    };
    line.write_fmt(args).ok();
    line.push('\n');
    line
}

fn render_prefixed(prefix: &str, args: fmt::Arguments<'_>) -> String {
    let mut line = String::from(prefix);
    line.write_fmt(args).ok();
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

/// Best-effort, single write to standard error.
fn emit(text: &str, flush_stdout: bool) {
    if flush_stdout {
        io::stdout().flush().ok();
        // C stdio keeps its own buffers, which exit(3C) would flush anyway
        unsafe { libc::fflush(std::ptr::null_mut()) };
    }
    let mut stderr = io::stderr().lock();
    stderr.write_all(text.as_bytes()).ok();
    stderr.flush().ok();
}
