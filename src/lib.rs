/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! Uniform error reporting for small POSIX programs.
//!
//! Programs that poke at system calls tend to need the same handful of
//! responses to failure: say what went wrong (and what errno thinks about it)
//! on standard error, then usually stop. This crate provides those
//! responses, one per kind of failure:
//!
//! | Macro | Reports | Then |
//! |---|---|---|
//! | [`err_msg!`] | errno + message | returns |
//! | [`err_exit!`] | errno + message | `exit(3C)` with status 1 |
//! | [`err_exit_now!`] | errno + message | `_exit(2)` with status 1, stdout unflushed |
//! | [`err_exit_en!`] | explicit error number + message | `exit(3C)` with status 1 |
//! | [`fatal!`] | message | `exit(3C)` with status 1 |
//! | [`usage_err!`] | `Usage: ` + message | `exit(3C)` with status 64 |
//! | [`cmd_line_err!`] | `Command-line usage error: ` + message | `exit(3C)` with status 65 |
//!
//! The macros take C format strings, checked against their arguments at
//! compile time. The plain functions behind them live in [`report`].
//!
//! Set `EF_DUMPCORE` to a non-empty value to have the failure reports call
//! `abort(3C)` instead of exiting, so there is a core file to look at.
//!
//! ## Example
//! ```no_run
//! use errfns::{err_exit, usage_err};
//! use std::ffi::CString;
//!
//! let args: Vec<String> = std::env::args().collect();
//! if args.len() != 2 {
//!     usage_err!("%s file\n", args[0]);
//! }
//!
//! let path = CString::new(args[1].as_str()).unwrap();
//! let fd = unsafe { libc::open(path.as_ptr(), libc::O_RDONLY) };
//! if fd == -1 {
//!     err_exit!("open %s", args[1]);
//! }
//! ```
//!
//! Error numbers handed back by value, rather than through errno, go to
//! [`err_exit_en!`]:
//!
//! ```no_run
//! let rc = unsafe { libc::pthread_mutex_unlock(std::ptr::null_mut()) };
//! if rc != 0 {
//!     errfns::err_exit_en!(rc, "pthread_mutex_unlock");
//! }
//! ```

mod macros;

pub mod config;
pub mod exit_status;
pub mod posix;
pub mod printf;
pub mod report;
pub mod terminate;

pub use exit_status::ExitStatus;
pub use posix::Errno;

#[doc(hidden)]
pub mod __private {
    pub use errfns_macros::c_format_args;
}
