//! Fixed-point helpers and decimal-string rendering
//!
//! All settlement-critical amounts in the core are 256-bit fixed-point
//! integers (18-decimal wad scaling for shares and rates, protocol-native
//! decimals for underlying amounts). These helpers render such amounts for
//! display and provide the power-of-ten scales the calculators divide by.

use alloy_primitives::{I256, U256};

/// Number of decimals in the wad (1e18) fixed-point convention.
pub const WAD_DECIMALS: u32 = 18;

/// `10^exp` as a `U256`. Valid for `exp <= 77` (larger powers exceed 256 bits).
pub fn pow10(exp: u32) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}

/// Infallible widening conversion to `U256`.
///
/// `U256` has no `From` impls for native integers (only fallible or
/// panicking conversions), so APIs that accept chain ids and block numbers
/// as either native-width or 256-bit integers bound on this trait instead.
pub trait IntoU256 {
    fn into_u256(self) -> U256;
}

impl IntoU256 for U256 {
    fn into_u256(self) -> U256 {
        self
    }
}

macro_rules! impl_into_u256 {
    ($($ty:ty),*) => {
        $(impl IntoU256 for $ty {
            fn into_u256(self) -> U256 {
                U256::from(self)
            }
        })*
    };
}

impl_into_u256!(u8, u16, u32, u64, u128, usize);

/// Render a fixed-point integer as a decimal string at `decimals` precision.
///
/// Integer part is `value / 10^decimals` (truncating); the fractional part is
/// `|value| % 10^decimals`, zero-padded to `decimals` digits with trailing
/// zeros stripped. A value with a zero fractional part renders with no
/// decimal point, and negative values carry a leading `-`.
///
/// ```
/// use alloy_primitives::I256;
/// use types::numeric::format_units;
///
/// let v = I256::try_from(1_205_000_000_000_000_000u128).unwrap();
/// assert_eq!(format_units(v, 18), "1.205");
/// assert_eq!(format_units(-v, 18), "-1.205");
/// assert_eq!(format_units(I256::ZERO, 18), "0");
/// ```
pub fn format_units(value: I256, decimals: u8) -> String {
    let sign = if value.is_negative() { "-" } else { "" };
    let abs = value.unsigned_abs();
    let scale = pow10(decimals as u32);

    let int_part = abs / scale;
    let frac_part = abs % scale;

    if frac_part.is_zero() {
        return format!("{sign}{int_part}");
    }

    let padded = format!("{frac_part:0>width$}", width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    format!("{sign}{int_part}.{trimmed}")
}

/// Lossy conversion to `f64` for display-only ratios and scores.
///
/// Never used on settlement-critical paths; values beyond f64 range saturate
/// to infinity.
pub fn to_f64(value: U256) -> f64 {
    value.to_string().parse::<f64>().unwrap_or(f64::INFINITY)
}
