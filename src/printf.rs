/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! `Display` adapters for the conversions where Rust and C disagree
//!
//! [`c_format!`](crate::c_format) routes `%c`, `%#o`, `%#x`, `%#X`, `%e` and
//! `%g` through these, so the output matches `printf(3C)`. Width, padding and
//! the `+` flag still come from the formatter. The radix adapters only add
//! their prefix under `{:#}`, which is how `c_format!` always invokes them.

use std::fmt;

/// Anything `%c` accepts. Integers are truncated to `unsigned char`, as C
/// does.
pub trait CodePoint {
    fn code_point(&self) -> char;
}

impl CodePoint for char {
    fn code_point(&self) -> char {
        *self
    }
}

macro_rules! code_point_from_int {
    ($($t:ident)*) => {$(
        impl CodePoint for $t {
            fn code_point(&self) -> char {
                (*self as u8) as char
            }
        }
    )*};
}

code_point_from_int!(u8 i8 u16 i16 u32 i32 u64 i64 usize isize);

/// `%c`
#[derive(Clone, Copy, Debug)]
pub struct CChar(char);

impl CChar {
    pub fn new<T: CodePoint + ?Sized>(value: &T) -> Self {
        Self(value.code_point())
    }
}

impl fmt::Display for CChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; 4];
        f.pad(self.0.encode_utf8(&mut buf))
    }
}

/// `%#o`: a leading `0` unless the value already starts with one.
pub struct AltOctal<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Octal + ?Sized> fmt::Display for AltOctal<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!("{:o}", self.0);
        let prefix = if digits == "0" { "" } else { "0" };
        f.pad_integral(true, prefix, &digits)
    }
}

/// `%#x`: `0x` before any non-zero value.
pub struct AltLowerHex<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::LowerHex + ?Sized> fmt::Display for AltLowerHex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!("{:x}", self.0);
        let prefix = if digits == "0" { "" } else { "0x" };
        f.pad_integral(true, prefix, &digits)
    }
}

/// `%#X`: `0X` before any non-zero value.
pub struct AltUpperHex<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::UpperHex + ?Sized> fmt::Display for AltUpperHex<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!("{:X}", self.0);
        let prefix = if digits == "0" { "" } else { "0X" };
        f.pad_integral(true, prefix, &digits)
    }
}

/// Anything the floating conversions accept.
pub trait CDouble {
    fn to_f64(&self) -> f64;
}

macro_rules! c_double_from {
    ($($t:ident)*) => {$(
        impl CDouble for $t {
            fn to_f64(&self) -> f64 {
                *self as f64
            }
        }
    )*};
}

c_double_from!(f32 f64 u8 i8 u16 i16 u32 i32 u64 i64 usize isize);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Style {
    Exponent,
    General,
}

/// `%e`, `%E`, `%g` and `%G`.
#[derive(Clone, Copy, Debug)]
pub struct CFloat {
    value: f64,
    style: Style,
    upper: bool,
}

impl CFloat {
    pub fn exponent<T: CDouble + ?Sized>(value: &T, upper: bool) -> Self {
        Self {
            value: value.to_f64(),
            style: Style::Exponent,
            upper,
        }
    }

    pub fn general<T: CDouble + ?Sized>(value: &T, upper: bool) -> Self {
        Self {
            value: value.to_f64(),
            style: Style::General,
            upper,
        }
    }
}

impl fmt::Display for CFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonnegative = !self.value.is_sign_negative();
        let magnitude = self.value.abs();

        let body = if magnitude.is_nan() {
            "nan".to_string()
        } else if magnitude.is_infinite() {
            "inf".to_string()
        } else {
            let precision = f.precision().unwrap_or(6);
            match self.style {
                Style::Exponent => exponent_form(magnitude, precision),
                Style::General => general_form(magnitude, precision, f.alternate()),
            }
        };
        let body = if self.upper { body.to_uppercase() } else { body };

        f.pad_integral(nonnegative, "", &body)
    }
}

/// `1.234568e+04`: at least two exponent digits, always signed.
fn exponent_form(magnitude: f64, precision: usize) -> String {
    let rust = format!("{:.*e}", precision, magnitude);
    let (mantissa, exponent) = split_exponent(&rust);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

/// `%g`: the shorter of `%e` and `%f` at `precision` significant digits,
/// trailing zeros trimmed unless `#` was given.
fn general_form(magnitude: f64, precision: usize, alternate: bool) -> String {
    let significant = precision.max(1);

    // The exponent after rounding to the requested significant digits
    let rounded = format!("{:.*e}", significant - 1, magnitude);
    let (_, exponent) = split_exponent(&rounded);

    let mut text = if exponent < -4 || exponent >= significant as i32 {
        exponent_form(magnitude, significant - 1)
    } else {
        let decimals = (significant as i32 - 1 - exponent) as usize;
        format!("{:.*}", decimals, magnitude)
    };

    if !alternate {
        let split = text.find('e').unwrap_or(text.len());
        let (mantissa, exponent) = text.split_at(split);
        if mantissa.contains('.') {
            let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
            text = format!("{}{}", trimmed, exponent);
        }
    }
    text
}

fn split_exponent(rust: &str) -> (&str, i32) {
    match rust.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (rust, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: impl fmt::Display) -> String {
        value.to_string()
    }

    #[test]
    fn chars_from_integers() {
        assert_eq!(render(CChar::new(&65)), "A");
        assert_eq!(render(CChar::new(&b'z')), "z");
        assert_eq!(render(CChar::new(&'é')), "é");
        assert_eq!(format!("[{:>3}]", CChar::new(&'x')), "[  x]");
    }

    #[test]
    fn alternate_octal() {
        assert_eq!(format!("{:#}", AltOctal(&8)), "010");
        assert_eq!(format!("{:#}", AltOctal(&0)), "0");
        assert_eq!(format!("{:>#5}", AltOctal(&8)), "  010");
    }

    #[test]
    fn alternate_hex() {
        assert_eq!(format!("{:#}", AltUpperHex(&255)), "0XFF");
        assert_eq!(format!("{:#}", AltLowerHex(&255)), "0xff");
        assert_eq!(format!("{:#}", AltLowerHex(&0)), "0");
        assert_eq!(format!("{:#08}", AltLowerHex(&255)), "0x0000ff");
    }

    #[test]
    fn exponent_like_c() {
        assert_eq!(render(CFloat::exponent(&12345.678, false)), "1.234568e+04");
        assert_eq!(render(CFloat::exponent(&0.000123, true)), "1.230000E-04");
        assert_eq!(format!("{:.2}", CFloat::exponent(&0.0, false)), "0.00e+00");
        assert_eq!(format!("{:.0}", CFloat::exponent(&5.0, false)), "5e+00");
        assert_eq!(render(CFloat::exponent(&1e100, false)), "1.000000e+100");
    }

    #[test]
    fn exponent_sign_and_padding() {
        assert_eq!(
            format!("[{:>12.3}]", CFloat::exponent(&-1234.56, false)),
            "[  -1.235e+03]"
        );
        assert_eq!(
            format!("{:010.2}", CFloat::exponent(&-5.0, false)),
            "-05.00e+00"
        );
        assert_eq!(format!("{:+.1}", CFloat::exponent(&2.0, false)), "+2.0e+00");
    }

    #[test]
    fn general_like_c() {
        assert_eq!(render(CFloat::general(&100.0, false)), "100");
        assert_eq!(render(CFloat::general(&0.5, false)), "0.5");
        assert_eq!(render(CFloat::general(&0.0001, false)), "0.0001");
        assert_eq!(render(CFloat::general(&0.00001, false)), "1e-05");
        assert_eq!(render(CFloat::general(&123456789.0, false)), "1.23457e+08");
        assert_eq!(render(CFloat::general(&123456789.0, true)), "1.23457E+08");
        assert_eq!(format!("{:.3}", CFloat::general(&1.23456, false)), "1.23");
        assert_eq!(render(CFloat::general(&0.0, false)), "0");
    }

    #[test]
    fn general_alternate_keeps_zeros() {
        assert_eq!(format!("{:#}", CFloat::general(&100.0, false)), "100.000");
    }

    #[test]
    fn non_finite() {
        assert_eq!(render(CFloat::exponent(&f64::INFINITY, false)), "inf");
        assert_eq!(render(CFloat::general(&f64::NEG_INFINITY, true)), "-INF");
        assert_eq!(render(CFloat::exponent(&f64::NAN, false)), "nan");
    }

    #[test]
    fn integers_are_promoted() {
        assert_eq!(render(CFloat::exponent(&3, false)), "3.000000e+00");
    }
}
