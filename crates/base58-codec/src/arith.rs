//! Long division over byte arrays.
//!
//! A number is a big-endian slice of digits in some base (256 for
//! raw bytes, 58 for Base58 digits). Converting it to another base
//! is repeated division by the new base, collecting the remainders.

use alloc::vec::Vec;

/// Divides `number`, a big-endian integer with digits in `base`, by
/// `divisor` in place.
///
/// Returns the quotient, which is the tail of `number` with its
/// leading zeros skipped, and the remainder.
///
/// `base` and `divisor` must be in `2..=256` and every digit must be
/// less than `base`.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub(crate) fn divmod(number: &mut [u8], base: u32, divisor: u32) -> (&mut [u8], u32) {
    debug_assert!((2..=256).contains(&base));
    debug_assert!((2..=256).contains(&divisor));

    let mut rem = 0;
    let mut start = None;
    for (i, digit) in number.iter_mut().enumerate() {
        // `rem < divisor` and `digit < base`, so `acc < divisor*base`
        // and the quotient digit is less than `base`.
        let acc = u32::from(*digit) + rem * base;
        let q = acc / divisor;
        rem = acc % divisor;
        *digit = q as u8;
        if start.is_none() && q != 0 {
            start = Some(i);
        }
    }
    let start = start.unwrap_or(number.len());
    (&mut number[start..], rem)
}

/// Converts `number` from `base` to `to` by repeated [`divmod`],
/// appending the new digits to `out` least significant first.
///
/// `number` is used as scratch space and is zero afterwards. Leading
/// zeros produce no output.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn rebase(number: &mut [u8], base: u32, to: u32, out: &mut Vec<u8>) {
    let mut rest = skip_zeros(number);
    while !rest.is_empty() {
        let (q, r) = divmod(rest, base, to);
        // `r < to <= 256`.
        out.push(r as u8);
        rest = q;
    }
}

/// Returns the number of leading bytes equal to `zero`.
pub(crate) fn leading(data: &[u8], zero: u8) -> usize {
    data.iter().take_while(|&&b| b == zero).count()
}

fn skip_zeros(number: &mut [u8]) -> &mut [u8] {
    let n = leading(number, 0);
    &mut number[n..]
}
