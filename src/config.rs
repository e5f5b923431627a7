/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! Behavior that can be changed from the environment

use std::ffi::OsStr;

/// Set this to anything non-empty to make the errno-reporting functions and
/// [`fatal`](crate::report::fatal) call `abort(3C)` rather than `exit(3C)`.
pub const DUMPCORE_VAR: &str = "EF_DUMPCORE";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Abort (and maybe leave a core file) instead of exiting.
    pub dump_core: bool,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_var(std::env::var_os(DUMPCORE_VAR).as_deref())
    }

    fn from_var(dump_core: Option<&OsStr>) -> Self {
        let dump_core = dump_core.map(|v| !v.is_empty()).unwrap_or(false);
        Self { dump_core }
    }
}
