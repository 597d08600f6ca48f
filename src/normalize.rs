use once_cell::sync::Lazy;
use regex::Regex;

// RFC 3986 scheme: one letter followed by letters, digits, '+', '.' or '-',
// terminated by ':'. Anything matching this at the start of a line is left alone.
static SCHEME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Split raw input into trimmed, non-empty lines. Handles both `\n` and `\r\n`.
pub fn split_lines(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Rewrite a raw line into a candidate absolute URL string.
///
/// Protocol-relative lines (`//host/...`) always get an `https:` prefix.
/// When `assume_https` is set, scheme-less lines get `https://` prepended;
/// otherwise the line is returned trimmed and unmodified. Total over all
/// inputs: the result may still fail to parse as a URL downstream.
pub fn normalize(raw_line: &str, assume_https: bool) -> String {
    let line = raw_line.trim();

    if line.is_empty() {
        return String::new();
    }

    if line.starts_with("//") {
        return format!("https:{}", line);
    }

    if !assume_https {
        return line.to_string();
    }

    if SCHEME_PATTERN.is_match(line) {
        line.to_string()
    } else {
        format!("https://{}", line)
    }
}
