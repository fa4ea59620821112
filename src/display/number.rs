//! Fixed-point number formatting.

/// Every finite `f64` has at most this many fractional decimal digits, so
/// formatting at this precision prints the exact value.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format `value` with exactly `digits` fractional digits.
///
/// Works on the exact decimal value of the float and rounds a tie away from
/// zero, so `0.625` gives `"0.63"` where `format!("{:.2}")` gives `"0.62"`.
/// Non-finite values print as `NaN`, `Infinity` and `-Infinity`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        round_up(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    // -0.0 is not negative here.
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..int_len].iter().map(|&b| char::from(b)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[int_len..].iter().map(|&b| char::from(b)));
    }
    out
}

/// Add one to the last digit, carrying left.
fn round_up(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
