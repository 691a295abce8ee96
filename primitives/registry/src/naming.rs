//! Naming helpers shared by the aggregation views.
//!
//! Proto identifiers and REST paths are ASCII in practice, so ordering only
//! needs the root collation ranks of ASCII punctuation.

use std::cmp::Ordering;

/// Convert an identifier to PascalCase (`taproot-assets` → `TaprootAssets`).
///
/// Words are split on any non-alphanumeric character; the first letter of each
/// word is uppercased and the rest is kept as written.
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Convert a PascalCase or camelCase identifier to snake_case.
///
/// Acronyms stay together (`HTLCInterceptor` → `htlc_interceptor`) and digits
/// stick to the preceding word (`SendPaymentV2` → `send_payment_v2`).
///
/// # Examples
/// ```
/// use registry::naming::snake_case;
/// assert_eq!(snake_case("GetInfo"), "get_info");
/// assert_eq!(snake_case("SendPaymentV2"), "send_payment_v2");
/// assert_eq!(snake_case("HTLCInterceptor"), "htlc_interceptor");
/// ```
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result.trim_end_matches('_').to_string()
}

/// Whitespace, punctuation and symbols in root collation order. All of them
/// sort before digits, and digits sort before letters.
const PUNCTUATION: &str = "\t\n\u{b}\u{c}\r _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary collation weight of `c`: (class, rank within the class).
fn primary_weight(c: char) -> (u8, u32) {
    if let Some(rank) = PUNCTUATION.find(c) {
        return (0, rank as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (1, digit);
    }
    if c.is_alphabetic() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        return (2, lower as u32);
    }
    (3, c as u32)
}

/// Compare two strings the way a root-locale collator orders identifiers.
///
/// The primary pass ranks punctuation before digits before letters, and
/// ignores case. On a tie, lowercase sorts before uppercase at the first
/// differing position, and finally by code point.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(primary_weight).cmp(b.chars().map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            };
        }
    }

    a.cmp(b)
}
