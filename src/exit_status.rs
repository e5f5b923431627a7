/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! Exit statuses for each kind of failure
//!
//! The usage statuses borrow their numbers from BSD's `sysexits.h`, so shell
//! scripts can tell "you called me wrong" apart from "something broke".

/// Why the process is going away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// A system call, library call, or the application itself failed.
    /// This is `EXIT_FAILURE`.
    Failure,

    /// The command was invoked with the wrong syntax. This is `EX_USAGE`.
    Usage,

    /// An argument parsed fine but its value was unacceptable. This is
    /// `EX_DATAERR`.
    CommandLine,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Failure => libc::EXIT_FAILURE,
            ExitStatus::Usage => 64,
            ExitStatus::CommandLine => 65,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_nonzero() {
        let codes = [
            ExitStatus::Failure.code(),
            ExitStatus::Usage.code(),
            ExitStatus::CommandLine.code(),
        ];
        assert!(codes.iter().all(|c| *c != 0));
        assert_ne!(codes[0], codes[1]);
        assert_ne!(codes[1], codes[2]);
        assert_ne!(codes[0], codes[2]);
    }

    #[test]
    fn failure_is_exit_failure() {
        assert_eq!(ExitStatus::Failure.code(), 1);
    }
}
