/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! printf-flavored front ends for the functions in [`report`](crate::report)

/// Build [`fmt::Arguments`](std::fmt::Arguments) from a C format string.
///
/// ```
/// let s = std::fmt::format(errfns::c_format!("%s has %d byte(s)", "buf", 3));
/// assert_eq!(s, "buf has 3 byte(s)");
/// ```
///
/// `%m` expands to the description of the current errno, as in glibc.
#[macro_export]
macro_rules! c_format {
    ($($fmt:tt)+) => {
        $crate::__private::c_format_args!($crate; $($fmt)+)
    };
}

/// `errMsg`: describe errno and the message on standard error, then carry on.
#[macro_export]
macro_rules! err_msg {
    ($($fmt:tt)+) => {
        $crate::report::err_msg($crate::c_format!($($fmt)+))
    };
}

/// `errExit`: describe errno and the message, then `exit(3C)`.
#[macro_export]
macro_rules! err_exit {
    ($($fmt:tt)+) => {
        $crate::report::err_exit($crate::c_format!($($fmt)+))
    };
}

/// `err_exit`: describe errno and the message, then `_exit(2)` without
/// flushing standard output.
#[macro_export]
macro_rules! err_exit_now {
    ($($fmt:tt)+) => {
        $crate::report::err_exit_now($crate::c_format!($($fmt)+))
    };
}

/// `errExitEN`: describe an explicit error number and the message, then exit.
#[macro_export]
macro_rules! err_exit_en {
    ($errnum:expr, $($fmt:tt)+) => {
        $crate::report::err_exit_en($errnum, $crate::c_format!($($fmt)+))
    };
}

/// `fatal`: report the message with no error number, then exit.
#[macro_export]
macro_rules! fatal {
    ($($fmt:tt)+) => {
        $crate::report::fatal($crate::c_format!($($fmt)+))
    };
}

/// `usageErr`: report a command-line syntax error and exit.
#[macro_export]
macro_rules! usage_err {
    ($($fmt:tt)+) => {
        $crate::report::usage_err($crate::c_format!($($fmt)+))
    };
}

/// `cmdLineErr`: report a bad command-line argument value and exit.
#[macro_export]
macro_rules! cmd_line_err {
    ($($fmt:tt)+) => {
        $crate::report::cmd_line_err($crate::c_format!($($fmt)+))
    };
}
