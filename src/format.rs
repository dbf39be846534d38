//! Fixed-point formatting for score fields.
//!
//! Rounds half-up on the exact binary value, the way a browser's `toFixed` does.
//! `format!("{:.2}")` rounds ties to even (0.125 -> "0.12"), which is not what the
//! result panel shows.

/// Enough digits to expose the exact expansion around any two-decimal tie.
const EXACT_DIGITS: usize = 40;

/// Format a score with two decimals.
pub fn score(x: f64) -> String {
    to_fixed(x, 2)
}

/// Format `x` with `places` decimals, rounding half-up on the magnitude.
pub fn to_fixed(x: f64, places: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // -0.0 < 0.0 is false, so negative zero prints unsigned.
    let negative = x < 0.0;
    let exact = format!("{:.*}", EXACT_DIGITS, x.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(places)
        .is_some_and(|&b| b >= b'5');
    if round_up {
        carry_one(&mut digits);
    }

    let int_len = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if negative {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| char::from(b'0' + d)));
    if places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

fn carry_one(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
