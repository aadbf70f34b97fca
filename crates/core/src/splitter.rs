const DEFAULT_DELIMITER: &str = ";";
const DELIMITER_DIRECTIVE: &str = "DELIMITER";
const LINE_COMMENT: &str = "--";

/// Splits a raw SQL script into individually executable statements.
///
/// Boundary detection is line-oriented: a statement ends when a line,
/// after trimming, ends with the active delimiter. The delimiter starts
/// as `;` and is changed by `DELIMITER <token>` directive lines, which
/// never become statements themselves. Blank lines and `--` comment
/// lines are skipped entirely.
///
/// Well-formed scripts place the terminator at end-of-line, so this is
/// sufficient without full tokenization. A line-terminal delimiter
/// embedded in a string literal is still treated as a terminator; scripts
/// fed to this splitter must not rely on that shape.
#[must_use]
pub fn split(script: &str) -> Vec<String> {
    let mut delimiter = DEFAULT_DELIMITER.to_string();
    let mut buffer = String::new();
    let mut statements = Vec::new();

    for line in script.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(LINE_COMMENT) {
            continue;
        }

        if is_delimiter_directive(trimmed) {
            flush(&mut buffer, &delimiter, &mut statements);
            if let Some(token) = directive_token(trimmed) {
                delimiter = token.to_string();
            }
            continue;
        }

        buffer.push_str(trimmed);
        buffer.push('\n');

        if trimmed.ends_with(delimiter.as_str()) {
            flush(&mut buffer, &delimiter, &mut statements);
        }
    }

    flush(&mut buffer, &delimiter, &mut statements);
    statements
}

fn is_delimiter_directive(trimmed_line: &str) -> bool {
    let head = trimmed_line
        .split_whitespace()
        .next()
        .unwrap_or(trimmed_line);
    head.eq_ignore_ascii_case(DELIMITER_DIRECTIVE)
}

fn directive_token(trimmed_line: &str) -> Option<&str> {
    trimmed_line.split_whitespace().nth(1)
}

fn flush(buffer: &mut String, delimiter: &str, statements: &mut Vec<String>) {
    let statement = strip_trailing_delimiter(buffer.trim_end(), delimiter)
        .trim()
        .to_string();
    buffer.clear();

    if !statement.is_empty() {
        statements.push(statement);
    }
}

fn strip_trailing_delimiter<'a>(text: &'a str, delimiter: &str) -> &'a str {
    text.strip_suffix(delimiter).unwrap_or(text)
}
