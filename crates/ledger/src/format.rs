//! The module contains the balance rendering helpers.
//!
//! Both renderings are pure: no locale tables, no caching, the same input
//! always gives the same string.

/// Render `balance` with exactly `decimal_places` fraction digits, grouping
/// the integer part in thousands with `,` when `use_separators` is set.
pub fn grouped(balance: f64, decimal_places: usize, use_separators: bool) -> String {
    let rendered = format!("{balance:.decimal_places$}");
    if !use_separators {
        return rendered;
    }

    let (number, fraction) = match rendered.split_once('.') {
        Some((number, fraction)) => (number, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", number),
    };

    let mut out = String::with_capacity(rendered.len() + digits.len() / 3);
    out.push_str(sign);
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (index + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out
}

/// Render `balance` as a magnitude-suffixed short string, one fraction digit
/// always: `875.0`, `2.5k`, `1.2B`.
pub fn shorthand(balance: f64) -> String {
    if balance < 1_000.0 {
        format!("{balance:.1}")
    } else if balance < 1_000_000.0 {
        format!("{:.1}k", balance / 1_000.0)
    } else if balance < 1_000_000_000.0 {
        format!("{:.1}M", balance / 1_000_000.0)
    } else if balance < 1_000_000_000_000.0 {
        format!("{:.1}B", balance / 1_000_000_000.0)
    } else {
        format!("{:.1}T", balance / 1_000_000_000_000.0)
    }
}
