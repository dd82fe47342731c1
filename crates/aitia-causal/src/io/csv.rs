//! Delimited-record splitting and quoting (RFC 4180 style).

use std::borrow::Cow;

/// Split one logical record into fields.
///
/// Quoted fields may contain the delimiter, doubled quotes, and newlines;
/// `line` is expected to hold the complete record.
pub(crate) fn split_record(line: &str, delimiter: char) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut was_quoted = false;

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' && field.is_empty() && !was_quoted {
            in_quotes = true;
            was_quoted = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut field));
            was_quoted = false;
        } else if was_quoted {
            return Err(format!("unexpected character `{ch}` after closing quote"));
        } else {
            field.push(ch);
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

/// Whether `record` ends inside a quoted field, i.e. the record continues
/// on the next line. A quote opens a field only as its first character;
/// quotes elsewhere in an unquoted field are literal.
pub(crate) fn has_open_quote(record: &str, delimiter: char) -> bool {
    let mut chars = record.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
        } else if ch == delimiter {
            at_field_start = true;
        } else {
            in_quotes = ch == '"' && at_field_start;
            at_field_start = false;
        }
    }
    in_quotes
}

/// Quote `field` if it contains the delimiter, a quote, or a line break.
pub(crate) fn escape_field(field: &str, delimiter: char) -> Cow<'_, str> {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Read complete records from `lines`, joining physical lines that continue
/// a quoted field. Blank records are skipped and trailing `\r` is dropped.
pub(crate) fn records<I>(
    lines: I,
    delimiter: char,
) -> impl Iterator<Item = std::io::Result<String>>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut lines = lines;
    std::iter::from_fn(move || loop {
        let mut record = match lines.next()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        while has_open_quote(&record, delimiter) {
            match lines.next() {
                Some(Ok(next)) => {
                    record.push('\n');
                    record.push_str(&next);
                }
                Some(Err(e)) => return Some(Err(e)),
                None => break,
            }
        }
        let trimmed = record.trim_end_matches('\r');
        if trimmed.trim().is_empty() {
            continue;
        }
        let len = trimmed.len();
        record.truncate(len);
        return Some(Ok(record));
    })
}
