//! Building route strings from runtime templates.
//!
//! Route templates use `{}` for positional holes and `{{`/`}}` for literal
//! braces. Named placeholders such as `{id}` are left untouched, so a template
//! can fill in some segments and keep others as route parameters.

use crate::error::FormatError;

use std::fmt::{Display, Write};

/// Fills the `{}` holes of `template` with `args`, in order.
///
/// ```rust
/// use segroute::{format_route, FormatError};
///
/// assert_eq!(format_route("students.{}.courses", &[&42]).unwrap(), "students.42.courses");
/// assert_eq!(format_route("users.{}.{id}", &[&"eu"]).unwrap(), "users.eu.{id}");
/// assert_eq!(
///     format_route("a.{}.{}", &[&1]),
///     Err(FormatError::MissingArgument { index: 1 })
/// );
/// ```
pub fn format_route(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut args_iter = args.iter();
    let mut holes = 0;

    // Start of the literal run not yet copied to `out`.
    let mut start = 0;
    let mut i = 0;

    while let Some(&c) = bytes.get(i) {
        match c {
            b'{' | b'}' if bytes.get(i + 1) == Some(&c) => {
                out.push_str(&template[start..i]);
                out.push(c as char);
                i += 2;
                start = i;
            }
            b'{' => {
                let close = match template[i + 1..].find(['{', '}']) {
                    Some(n) if bytes[i + 1 + n] == b'}' => i + 1 + n,
                    _ => return Err(FormatError::UnclosedBrace { offset: i }),
                };

                out.push_str(&template[start..i]);
                if close == i + 1 {
                    let arg = args_iter
                        .next()
                        .ok_or(FormatError::MissingArgument { index: holes })?;
                    write!(out, "{}", arg).map_err(|_| FormatError::Argument { index: holes })?;
                    holes += 1;
                } else {
                    // a route parameter, kept as written
                    out.push_str(&template[i..=close]);
                }

                i = close + 1;
                start = i;
            }
            b'}' => return Err(FormatError::UnmatchedBrace { offset: i }),
            _ => i += 1,
        }
    }

    out.push_str(&template[start..]);

    if args.len() > holes {
        return Err(FormatError::UnusedArguments {
            expected: holes,
            got: args.len(),
        });
    }

    Ok(out)
}
