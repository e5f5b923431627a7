/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! POSIX error numbers and how to talk about them
//!
//! The header-shaped submodules ([`errno_h`], [`string_h`]) stay close to the
//! C API. [`Errno`] is the Rust-friendly face the rest of the crate uses.

pub mod errno_h;
pub mod string_h;

use std::fmt;

/// An error number, as found in `errno` or returned by functions like
/// [`PTHREAD_CREATE(3C)`] that hand the code back directly.
///
/// [`PTHREAD_CREATE(3C)`]: https://illumos.org/man/3c/pthread_create
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Errno(pub libc::c_int);

impl Errno {
    /// Capture the calling thread's current errno.
    pub fn last() -> Self {
        Self(errno_h::errno())
    }

    /// Make this the calling thread's errno.
    pub fn set(self) {
        errno_h::set_errno(self.0)
    }

    pub fn code(&self) -> libc::c_int {
        self.0
    }

    /// Symbolic name, like `ENOENT`, when we know it.
    pub fn name(&self) -> Option<&'static str> {
        errno_h::ename(self.0)
    }

    /// The platform's human-readable description.
    pub fn description(&self) -> String {
        string_h::strerror(self.0)
    }
}

impl From<libc::c_int> for Errno {
    fn from(code: libc::c_int) -> Self {
        Self(code)
    }
}

/// Renders as `ENOENT No such file or directory`.
impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or("?UNKNOWN?");
        write!(f, "{} {}", name, self.description())
    }
}
