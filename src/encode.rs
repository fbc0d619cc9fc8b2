//! Number to character code conversions used by the LCD writers.
//!
//! Every encoder returns a [`Digits`] string of ASCII codes in display order. Nothing here
//! allocates and nothing touches hardware.

use heapless::String;

/// Longest output is a float: sign, ten integer digits, point, three fraction digits.
const CAPACITY: usize = 16;

/// Character codes in display order.
pub type Digits = String<CAPACITY>;

/// Append one ASCII code. Every encoder stays within [`CAPACITY`]; anything past it is
/// clipped rather than written.
fn push(out: &mut Digits, c: u8) {
    let _ = out.push(c as char);
}

/// Signed decimal without leading zeros, `-` prefixed when negative.
pub fn decimal(value: i32) -> Digits {
    let mut out = Digits::new();
    if value == 0 {
        push(&mut out, b'0');
        return out;
    }
    if value < 0 {
        push(&mut out, b'-');
    }

    // Least significant digit first, then reversed into place.
    let mut magnitude = value.unsigned_abs();
    let mut reversed = [0u8; 10];
    let mut count = 0;
    while magnitude > 0 {
        reversed[count] = (magnitude % 10) as u8 + b'0';
        magnitude /= 10;
        count += 1;
    }
    for &c in reversed[..count].iter().rev() {
        push(&mut out, c);
    }
    out
}

/// Exactly four digits, zero padded. Values above 9999 keep their low four digits.
pub fn four_digits(value: u16) -> Digits {
    let mut out = Digits::new();
    let mut divisor = 1000;
    for _ in 0..4 {
        push(&mut out, ((value % (divisor * 10)) / divisor) as u8 + b'0');
        divisor /= 10;
    }
    out
}

/// All eight bits, most significant first.
pub fn binary(value: u8) -> Digits {
    let mut out = Digits::new();
    for bit in (0..8).rev() {
        push(&mut out, if (value >> bit) & 1 == 1 { b'1' } else { b'0' });
    }
    out
}

/// Bits from the highest set bit down. Zero yields an empty buffer.
pub fn binary_short(value: u8) -> Digits {
    let mut out = Digits::new();
    let mut seen_one = false;
    for bit in (0..8).rev() {
        if (value >> bit) & 1 == 1 {
            push(&mut out, b'1');
            seen_one = true;
        } else if seen_one {
            push(&mut out, b'0');
        }
    }
    out
}

/// Two uppercase hex digits, high nibble first.
pub fn hex(value: u8) -> Digits {
    let mut out = Digits::new();
    push(&mut out, hex_digit(value >> 4));
    push(&mut out, hex_digit(value & 0x0f));
    out
}

fn hex_digit(nibble: u8) -> u8 {
    if nibble <= 9 {
        nibble + b'0'
    } else {
        nibble - 10 + b'A'
    }
}

/// Truncated integer part, `.`, then three fraction digits.
///
/// The fraction is `(value - trunc(value)) * 1000` truncated, so representation error can cost
/// one unit in the last place (`0.456` may show as `455`). Only the integer part carries a
/// sign, which means values in (-1, 0) print without one.
///
/// Values outside the `i32` range saturate to `i32::MIN`/`i32::MAX` with a `.000` fraction,
/// NaN shows as `0.000`.
pub fn float(value: f32) -> Digits {
    let int_part = value as i32;
    let fraction = if value.is_finite() && value > i32::MIN as f32 && value < i32::MAX as f32 {
        (((value - int_part as f32) * 1000.0) as i32).unsigned_abs().min(999)
    } else {
        0
    };

    let mut out = decimal(int_part);
    push(&mut out, b'.');
    if fraction < 10 {
        push(&mut out, b'0');
        push(&mut out, b'0');
    } else if fraction < 100 {
        push(&mut out, b'0');
    }
    for c in decimal(fraction as i32).bytes() {
        push(&mut out, c);
    }
    out
}
