//! CLI output formatting utilities.
//!
//! - JSON syntax highlighting
//! - Colored booleans for table cells

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (default)
pub fn print_highlighted_json(value: &Value) { println!("{}", highlight_json(value)); }

/// Pretty-prints `value` like `serde_json::to_string_pretty`, with ANSI colors.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    let _ = match value {
        Value::Null => write!(out, "{}", "null".magenta()),
        Value::Bool(b) => write!(out, "{}", b.to_string().magenta()),
        Value::Number(n) => write!(out, "{}", n.to_string().yellow()),
        Value::String(s) => write!(out, "{}", quoted(s).green()),
        Value::Array(items) => {
            write_block(out, ('[', ']'), items.iter().map(|v| (None, v)), items.len(), depth);
            Ok(())
        }
        Value::Object(map) => {
            let entries = map.iter().map(|(k, v)| (Some(k.as_str()), v));
            write_block(out, ('{', '}'), entries, map.len(), depth);
            Ok(())
        }
    };
}

/// Writes an array or object, one entry per line, indented by two spaces.
fn write_block<'a>(
    out: &mut String,
    (open, close): (char, char),
    entries: impl Iterator<Item = (Option<&'a str>, &'a Value)>,
    len: usize,
    depth: usize,
) {
    let _ = write!(out, "{}", open.to_string().white().bold());
    if len == 0 {
        let _ = write!(out, "{}", close.to_string().white().bold());
        return;
    }

    out.push('\n');
    let indent = "  ".repeat(depth + 1);
    for (i, (key, value)) in entries.enumerate() {
        out.push_str(&indent);
        if let Some(key) = key {
            let _ = write!(out, "{}{} ", quoted(key).cyan(), ":".white());
        }
        write_value(out, value, depth + 1);
        if i + 1 < len {
            let _ = write!(out, "{}", ",".white());
        }
        out.push('\n');
    }
    let _ = write!(out, "{}{}", "  ".repeat(depth), close.to_string().white().bold());
}

/// JSON string literal of `s`, with escapes.
fn quoted(s: &str) -> String { Value::from(s).to_string() }

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain<T>(f: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        let result = f();
        colored::control::unset_override();
        result
    }

    #[test]
    fn test_highlight_json_preserves_text_without_colors() {
        let value = serde_json::json!({
            "hour": 13,
            "label": "after \"noon\"",
            "visible": true,
            "alpha": [255, 38, 12],
            "opacity": 0.85,
            "nested": { "empty": [], "none": {} },
            "missing": null
        });

        let expected = serde_json::to_string_pretty(&value).unwrap();
        assert_eq!(plain(|| highlight_json(&value)), expected);
    }

    #[test]
    fn test_format_bool_true() {
        assert!(format_bool(true).contains('✓'));
    }

    #[test]
    fn test_format_bool_false() {
        assert!(format_bool(false).contains('✗'));
    }
}
