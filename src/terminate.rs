/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! Ending the process

use crate::config::Config;
use crate::exit_status::ExitStatus;
use log::{debug, trace};

/// How to leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Go through [`EXIT(3C)`]: run exit handlers and flush stdio buffers.
    ///
    /// [`EXIT(3C)`]: https://illumos.org/man/3c/exit
    Exit,

    /// Go through [`_EXIT(2)`]: skip exit handlers and leave stdio buffers
    /// alone. This is what a child should do after `fork(2)`, so that it does
    /// not flush a copy of its parent's buffered output a second time.
    ///
    /// [`_EXIT(2)`]: https://illumos.org/man/2/exit
    Immediate,
}

/// End the process with `status`.
///
/// A [`ExitStatus::Failure`] honors [`Config::dump_core`] and aborts instead.
/// Usage errors always exit: a core file is no help to someone who mistyped
/// a flag.
pub fn terminate(status: ExitStatus, mode: Mode) -> ! {
    if status == ExitStatus::Failure && Config::from_env().dump_core {
        trace!("{} is set, aborting", crate::config::DUMPCORE_VAR);
        std::process::abort();
    }

    let code = status.code();
    debug!("terminating with status {} ({:?}, {:?})", code, status, mode);
    match mode {
        Mode::Exit => std::process::exit(code),
        Mode::Immediate => unsafe { libc::_exit(code) },
    }
}
