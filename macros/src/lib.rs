/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Copyright 2024 Robert D. French
 */

//! This module contains a single macro [`macro@c_format_args`] for turning a
//! C `printf(3C)` format string into a Rust [`format_args!`] invocation.
//!
//! You almost certainly want the `errfns::c_format!` wrapper rather than this
//! macro directly: the wrapper supplies the crate path that `%m` expands
//! into.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use proc_macro2::TokenTree;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Error, Expr, LitStr, Token};

/// Translate a C format string and its arguments into `format_args!`.
///
/// The input is `<crate path> ; "format", args...`. Conversion rules follow
/// `printf(3C)` closely enough for diagnostics:
///
/// ```
/// let s = std::fmt::format(errfns::c_format!("%05d|%-4s|%x|100%%", 42, "ab", 255));
/// assert_eq!(s, "00042|ab  |ff|100%");
/// ```
///
/// Mismatched argument counts are a compile error:
///
/// ```compile_fail
/// errfns::c_format!("%s and %s", "one");
/// ```
#[proc_macro]
pub fn c_format_args(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as CFormat);

    let translation = match translate(&input.format.value()) {
        Ok(t) => t,
        Err(msg) => {
            return Error::new(input.format.span(), msg)
                .to_compile_error()
                .into()
        }
    };

    let wanted = translation.argument_count();
    if wanted != input.args.len() {
        let msg = format!(
            "format string has {} conversion(s) but {} argument(s) were given",
            wanted,
            input.args.len()
        );
        return Error::new(input.format.span(), msg).to_compile_error().into();
    }

    // Interleave the caller's arguments with errno lookups for each %m.
    let krate = &input.krate;
    let mut args = input.args.iter();
    let mut values: Vec<TokenStream2> = Vec::new();
    for slot in &translation.slots {
        match slot {
            Slot::Argument(wrap) => {
                if let Some(arg) = args.next() {
                    values.push(wrap.apply(krate, arg));
                }
            }
            Slot::Errno => values.push(quote! {
                #krate::posix::Errno::last().description()
            }),
        }
    }

    let template = LitStr::new(&translation.template, input.format.span());
    let q = quote! {
        ::core::format_args!(#template #(, #values)*)
    };

    TokenStream::from(q)
}

struct CFormat {
    krate: TokenStream2,
    format: LitStr,
    args: Vec<Expr>,
}

impl Parse for CFormat {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // Everything up to the first `;` is the path of the errfns crate. It
        // usually arrives as a lone `$crate` token.
        let mut krate = TokenStream2::new();
        while !input.peek(Token![;]) {
            if input.is_empty() {
                return Err(input.error("expected `;` after the crate path"));
            }
            let tt: TokenTree = input.parse()?;
            krate.extend(std::iter::once(tt));
        }
        input.parse::<Token![;]>()?;

        let format: LitStr = input.parse()?;
        let mut args = Vec::new();
        while !input.is_empty() {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            args.push(input.parse()?);
        }

        Ok(Self {
            krate,
            format,
            args,
        })
    }
}

/// What a single `{}` in the translated template is filled with.
#[derive(Debug, PartialEq)]
enum Slot {
    /// The next caller-supplied argument, possibly wrapped
    Argument(Wrap),
    /// The description of the ambient errno (`%m`)
    Errno,
}

/// Conversions Rust's own formatting traits render differently from C get
/// routed through an adapter in `errfns::printf`.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Wrap {
    None,
    Char,
    AltOctal,
    AltLowerHex,
    AltUpperHex,
    Exponent,
    UpperExponent,
    General,
    UpperGeneral,
}

impl Wrap {
    fn apply(self, krate: &TokenStream2, arg: &Expr) -> TokenStream2 {
        let printf = quote! { #krate::printf };
        match self {
            Wrap::None => quote! { #arg },
            Wrap::Char => quote! { #printf::CChar::new(&(#arg)) },
            Wrap::AltOctal => quote! { #printf::AltOctal(&(#arg)) },
            Wrap::AltLowerHex => quote! { #printf::AltLowerHex(&(#arg)) },
            Wrap::AltUpperHex => quote! { #printf::AltUpperHex(&(#arg)) },
            Wrap::Exponent => {
                quote! { #printf::CFloat::exponent(&(#arg), false) }
            }
            Wrap::UpperExponent => {
                quote! { #printf::CFloat::exponent(&(#arg), true) }
            }
            Wrap::General => quote! { #printf::CFloat::general(&(#arg), false) },
            Wrap::UpperGeneral => {
                quote! { #printf::CFloat::general(&(#arg), true) }
            }
        }
    }
}

/// A format string rewritten in Rust's syntax.
#[derive(Debug, PartialEq)]
struct Translation {
    template: String,
    slots: Vec<Slot>,
}

impl Translation {
    fn argument_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Argument(_)))
            .count()
    }
}

#[derive(Default)]
struct Flags {
    left: bool,
    plus: bool,
    alternate: bool,
    zero: bool,
}

fn translate(format: &str) -> Result<Translation, String> {
    let mut template = String::with_capacity(format.len());
    let mut slots = Vec::new();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '%' => {}
            '{' => {
                template.push_str("{{");
                continue;
            }
            '}' => {
                template.push_str("}}");
                continue;
            }
            _ => {
                template.push(c);
                continue;
            }
        }

        if chars.peek() == Some(&'%') {
            chars.next();
            template.push('%');
            continue;
        }

        let mut flags = Flags::default();
        while let Some(&f) = chars.peek() {
            match f {
                '-' => flags.left = true,
                '+' => flags.plus = true,
                '#' => flags.alternate = true,
                '0' => flags.zero = true,
                ' ' => {}
                _ => break,
            }
            chars.next();
        }

        let mut width = String::new();
        while let Some(&d) = chars.peek() {
            if d == '*' {
                return Err("`*` widths are not supported".to_string());
            }
            if !d.is_ascii_digit() {
                break;
            }
            width.push(d);
            chars.next();
        }

        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if d == '*' {
                    return Err("`*` precisions are not supported".to_string());
                }
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            if digits.is_empty() {
                digits.push('0');
            }
            precision = Some(digits);
        }

        // Length modifiers carry no meaning once the argument is typed.
        while let Some(&l) = chars.peek() {
            match l {
                'h' | 'l' | 'q' | 'j' | 'z' | 't' | 'L' => {
                    chars.next();
                }
                _ => break,
            }
        }

        let conversion = match chars.next() {
            Some(conversion) => conversion,
            None => return Err("format string ends in a lone `%`".to_string()),
        };

        let alt = flags.alternate;
        let (kind, wrap, numeric, takes_precision, slot) = match conversion {
            'd' | 'i' | 'u' => ("", Wrap::None, true, false, true),
            's' => ("", Wrap::None, false, true, true),
            'c' => ("", Wrap::Char, false, false, true),
            'p' => ("p", Wrap::None, false, false, true),
            'x' if alt => ("", Wrap::AltLowerHex, true, false, true),
            'X' if alt => ("", Wrap::AltUpperHex, true, false, true),
            'o' if alt => ("", Wrap::AltOctal, true, false, true),
            'x' => ("x", Wrap::None, true, false, true),
            'X' => ("X", Wrap::None, true, false, true),
            'o' => ("o", Wrap::None, true, false, true),
            'f' | 'F' => ("", Wrap::None, true, true, true),
            'e' => ("", Wrap::Exponent, true, true, true),
            'E' => ("", Wrap::UpperExponent, true, true, true),
            'g' => ("", Wrap::General, true, true, true),
            'G' => ("", Wrap::UpperGeneral, true, true, true),
            'm' => ("", Wrap::None, false, true, false),
            other => {
                return Err(format!("unsupported conversion `%{}`", other));
            }
        };

        if precision.is_some() && !takes_precision {
            return Err(format!(
                "precision is not supported for `%{}`",
                conversion
            ));
        }
        if precision.is_none() && matches!(conversion, 'f' | 'F') {
            precision = Some("6".to_string());
        }

        // Rust left-aligns text by default, C right-aligns everything, and C
        // only zero-pads numbers.
        let zero = flags.zero && numeric && !flags.left;
        let mut spec = String::new();
        if !width.is_empty() {
            if flags.left {
                spec.push('<');
            } else if !zero {
                spec.push('>');
            }
        }
        if flags.plus {
            spec.push('+');
        }
        if alt {
            spec.push('#');
        }
        if zero && !width.is_empty() {
            spec.push('0');
        }
        spec.push_str(&width);
        if let Some(p) = precision {
            spec.push('.');
            spec.push_str(&p);
        }
        spec.push_str(kind);

        if spec.is_empty() {
            template.push_str("{}");
        } else {
            template.push_str("{:");
            template.push_str(&spec);
            template.push('}');
        }
        slots.push(if slot { Slot::Argument(wrap) } else { Slot::Errno });
    }

    Ok(Translation { template, slots })
}
