// Utility functions

/// Collapses whitespace runs into single spaces and trims the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = true;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Parses display counts such as "1.5M", "250K+", "2B" or "12,345".
///
/// Only the first number in `text` is read. A K/M/B right after it scales the
/// decimal value. Without a suffix only the digits count, so "1.234" is taken
/// as a thousands-separated 1234. Anything unreadable yields 0.
pub fn parse_count(text: &str) -> u64 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(rest.len());
    let (number, tail) = rest.split_at(end);

    let mut suffix = tail.trim_start().chars();
    let multiplier = match (suffix.next().map(|c| c.to_ascii_uppercase()), suffix.next()) {
        (Some('K'), next) if !next.is_some_and(char::is_alphabetic) => 1_000.0,
        (Some('M'), next) if !next.is_some_and(char::is_alphabetic) => 1_000_000.0,
        (Some('B'), next) if !next.is_some_and(char::is_alphabetic) => 1_000_000_000.0,
        _ => {
            let digits: String = number.chars().filter(char::is_ascii_digit).collect();
            return digits.parse().unwrap_or(0);
        }
    };

    let decimal: String = number.chars().filter(|c| *c != ',').collect();
    match decimal.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => (value * multiplier).round() as u64,
        _ => 0,
    }
}

/// Returns the first decimal number in `text`, accepting ',' as the separator.
pub fn first_decimal(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let mut seen_sep = false;
    let mut end = start;
    for (i, c) in text[start..].char_indices() {
        if c.is_ascii_digit() {
            end = start + i + 1;
        } else if (c == '.' || c == ',') && !seen_sep {
            seen_sep = true;
        } else {
            break;
        }
    }
    text[start..end].replace(',', ".").parse().ok()
}
