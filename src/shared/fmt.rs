//! Plain-text display helpers backing the envelope formatter hints.
//!
//! Markup production lives in the presentation layer; these cover the
//! string-shaping halves it delegates back to the SDK.

/// Condense a string for display: `head...tail`.
///
/// Strings no longer than `begin + end` are returned unchanged. With
/// `end == 0` only the head survives.
pub fn condensed(s: &str, begin: usize, end: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= begin + end {
        return s.to_string();
    }
    let head: String = chars[..begin.min(chars.len())].iter().collect();
    if end == 0 {
        return format!("{}...", head);
    }
    let tail: String = chars[chars.len() - end..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Add thousands separators to the integer part of a decimal string.
pub fn group_digits(n: &str) -> String {
    let (integer_part, fraction) = match n.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (n, None),
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let grouped = digits
        .chars()
        .rev()
        .collect::<String>()
        .as_bytes()
        .chunks(3)
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect::<String>();

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
