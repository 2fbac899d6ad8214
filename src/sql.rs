//! `?`-placeholder substitution and string/identifier quoting for building SQL text client-side.
//!
//! This crate speaks the text protocol exclusively (no prepared statements, see the crate's
//! design notes), so parameters are substituted into the query string before it is ever sent.

use crate::error::Error;

/// Quotes a string literal: `None` becomes `NULL`; otherwise backslashes are doubled, `\0`,
/// `\n`, `\r`, `'`, and `\x1A` are backslash-escaped, and the result is wrapped in single quotes.
pub fn quote(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::from("NULL");
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');

    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\'' => out.push_str("\\'"),
            '\x1A' => out.push_str("\\Z"),
            ch => out.push(ch),
        }
    }

    out.push('\'');
    out
}

/// Quotes an identifier: `None` becomes `NULL`; otherwise internal backticks are doubled and the
/// result is wrapped in backticks.
pub fn quote_id(id: Option<&str>) -> String {
    let Some(id) = id else {
        return String::from("NULL");
    };

    let mut out = String::with_capacity(id.len() + 2);
    out.push('`');
    for ch in id.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
    out
}

/// Substitutes each unescaped `?` in `template`, in order, with `quote(args[i])`. A `?` inside a
/// single- or double-quoted string literal is left untouched.
///
/// Fails with [`Error::ArityMismatch`] if the number of placeholders in `template` doesn't equal
/// `args.len()`.
pub fn expand_sql(template: &str, args: &[Option<&str>]) -> Result<String, Error> {
    let mut out = String::with_capacity(template.len());
    let mut placeholders = 0;
    let mut chars = template.chars();
    let mut quote_char: Option<char> = None;

    while let Some(ch) = chars.next() {
        match quote_char {
            Some(_) if ch == '\\' => {
                out.push(ch);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }

            Some(q) if ch == q => {
                out.push(ch);
                quote_char = None;
            }

            Some(_) => out.push(ch),

            None if ch == '\'' || ch == '"' => {
                quote_char = Some(ch);
                out.push(ch);
            }

            None if ch == '?' => {
                if let Some(arg) = args.get(placeholders) {
                    out.push_str(&quote(*arg));
                }
                placeholders += 1;
            }

            None => out.push(ch),
        }
    }

    if placeholders != args.len() {
        return Err(Error::ArityMismatch {
            placeholders,
            arguments: args.len(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_quotes_null_for_absent_values() {
        assert_eq!(quote(None), "NULL");
        assert_eq!(quote_id(None), "NULL");
    }

    #[test]
    fn it_escapes_special_characters_in_string_literals() {
        assert_eq!(quote(Some("it's \\ a\ntest")), "'it\\'s \\\\ a\\ntest'");
    }

    #[test]
    fn it_doubles_internal_backticks_in_identifiers() {
        assert_eq!(quote_id(Some("weird`name")), "`weird``name`");
    }

    #[test]
    fn it_substitutes_placeholders_in_order() {
        let sql = expand_sql("SELECT * FROM t WHERE a = ? AND b = ?", &[Some("x"), None]).unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE a = 'x' AND b = NULL");
    }

    #[test]
    fn it_leaves_placeholders_inside_string_literals_alone() {
        let sql = expand_sql("SELECT '?' WHERE a = ?", &[Some("x")]).unwrap();
        assert_eq!(sql, "SELECT '?' WHERE a = 'x'");
    }

    #[test]
    fn it_rejects_an_argument_count_mismatch() {
        let err = expand_sql("SELECT ?", &[]).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { placeholders: 1, arguments: 0 }));
    }
}
