/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! The one function from `string.h` that we care about
use std::ffi::CStr;

/// Large enough for every message glibc, musl, and the BSDs ship.
const STRERROR_BUF_SIZE: usize = 256;

/// Describe an error number the way [`STRERROR(3C)`] would.
///
/// This goes through the reentrant `strerror_r` so that a second thread
/// calling `strerror` cannot scribble over our text. If the platform has
/// nothing to say, we make up an "Unknown error" message rather than
/// returning an empty string.
///
/// [`STRERROR(3C)`]: https://illumos.org/man/3c/strerror
pub fn strerror(errnum: libc::c_int) -> String {
    let mut buf = [0 as libc::c_char; STRERROR_BUF_SIZE];

    // The buffer starts zeroed and strerror_r never sees the last byte, so it
    // stays NUL-terminated whatever the return code.
    unsafe { libc::strerror_r(errnum, buf.as_mut_ptr(), buf.len() - 1) };
    let text = unsafe { CStr::from_ptr(buf.as_ptr()) };

    match text.to_bytes() {
        [] => format!("Unknown error {}", errnum),
        _ => text.to_string_lossy().into_owned(),
    }
}
