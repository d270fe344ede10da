use borsh::{BorshDeserialize, BorshSerialize};
use num_traits::CheckedAdd;
use std::error;
use std::fmt;
use std::ops::Add;

/// The number of Lovelace in one ADA.
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Number of decimal places in an ADA amount.
const ADA_DECIMALS: usize = 6;

/// Distance in Lovelace within which a converted amount is taken as whole.
const WHOLE_LOVELACE_TOLERANCE: f64 = 1e-6;

/// A non-negative quantity of Lovelace.
///
/// The full `u64` range is representable. Addition through
/// [`CheckedAdd`], [`add_lovelace`] or [`sum_lovelace`] reports overflow; the
/// `+` operator panics on overflow rather than wrapping.
#[derive(
    Clone,
    Copy,
    Default,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Lovelace(u64);

impl Lovelace {
    pub const ZERO: Lovelace = Lovelace(0);
    pub const MAX: Lovelace = Lovelace(u64::MAX);

    pub const fn from_u64(amount: u64) -> Self {
        Lovelace(amount)
    }

    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Converts a whole or fractional ADA amount, see [`to_lovelace`].
    pub fn from_ada(ada: f64) -> Result<Self, ConversionError> {
        to_lovelace(ada)
    }

    /// See [`to_ada`].
    pub fn to_ada(self) -> f64 {
        to_ada(self)
    }

    /// Renders the amount in ADA with six decimal places, see [`format_ada`].
    pub fn display_ada(self) -> String {
        format_ada(self)
    }
}

impl From<u64> for Lovelace {
    fn from(amount: u64) -> Self {
        Lovelace(amount)
    }
}

impl From<Lovelace> for u64 {
    fn from(amount: Lovelace) -> u64 {
        amount.0
    }
}

impl fmt::Display for Lovelace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Lovelace", self.0)
    }
}

impl Add<Lovelace> for Lovelace {
    type Output = Lovelace;

    fn add(self, rhs: Lovelace) -> Lovelace {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Lovelace(sum),
            None => panic!("overflow detected"),
        }
    }
}

impl CheckedAdd for Lovelace {
    fn checked_add(&self, rhs: &Lovelace) -> Option<Lovelace> {
        self.0.checked_add(rhs.0).map(Lovelace)
    }
}

/// Converts an ADA amount to Lovelace, truncating any sub-Lovelace fraction.
///
/// Products within one millionth of a Lovelace of a whole value are taken
/// as that value before truncation, so `4.35` (whose product evaluates to
/// `4349999.999999999`) converts to `4_350_000`. The window is absolute: at
/// any magnitude a fraction of a millionth of a Lovelace or more is
/// truncated. Above 2^32 Lovelace the `f64` spacing itself exceeds the
/// window and `ada` is truncated as given; use [`parse_ada`] for exact
/// conversion.
///
/// Returns an error if `ada` is negative, NaN, or too large for a `u64`
/// Lovelace count.
pub fn to_lovelace(ada: f64) -> Result<Lovelace, ConversionError> {
    if ada.is_nan() {
        return Err(ConversionError::NotANumber);
    }
    if ada < 0.0 {
        return Err(ConversionError::Negative);
    }

    let scaled = ada * LOVELACE_PER_ADA as f64;
    let nearest = scaled.round();
    let units = if (scaled - nearest).abs() <= WHOLE_LOVELACE_TOLERANCE {
        nearest
    } else {
        scaled.trunc()
    };

    // `u64::MAX as f64` rounds up to 2^64, the first value that cannot fit.
    if units >= u64::MAX as f64 {
        return Err(ConversionError::OutOfRange);
    }
    Ok(Lovelace(units as u64))
}

/// Parses a decimal ADA string such as `"1.5"` or `"0.000001"` exactly.
///
/// Digits beyond the sixth decimal place are truncated. Signs, exponents,
/// separators and empty components other than a trailing `"."` are rejected.
pub fn parse_ada(s: &str) -> Result<Lovelace, ConversionError> {
    if s.starts_with('-') {
        return Err(ConversionError::Negative);
    }
    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };
    if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
        return Err(ConversionError::InvalidFormat);
    }

    let mut lovelace: u64 = 0;
    for digit in whole.bytes() {
        lovelace = lovelace
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
            .ok_or(ConversionError::OutOfRange)?;
    }
    lovelace = lovelace
        .checked_mul(LOVELACE_PER_ADA)
        .ok_or(ConversionError::OutOfRange)?;

    let mut scale = LOVELACE_PER_ADA;
    for digit in frac.bytes().take(ADA_DECIMALS) {
        scale /= 10;
        lovelace = lovelace
            .checked_add(u64::from(digit - b'0') * scale)
            .ok_or(ConversionError::OutOfRange)?;
    }
    Ok(Lovelace(lovelace))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Converts Lovelace to ADA.
pub fn to_ada(amount: Lovelace) -> f64 {
    amount.0 as f64 / LOVELACE_PER_ADA as f64
}

/// Formats an amount as ADA with six decimal places, e.g. `"1.310000 ADA"`.
pub fn format_ada(amount: Lovelace) -> String {
    format!(
        "{}.{:0width$} ADA",
        amount.0 / LOVELACE_PER_ADA,
        amount.0 % LOVELACE_PER_ADA,
        width = ADA_DECIMALS
    )
}

/// Formats an amount with its unit, e.g. `"1310000 Lovelace"`.
pub fn format_lovelace(amount: Lovelace) -> String {
    amount.to_string()
}

/// Adds two amounts, failing instead of wrapping.
pub fn add_lovelace(a: Lovelace, b: Lovelace) -> Result<Lovelace, BalanceError> {
    a.checked_add(&b)
        .ok_or(BalanceError::Overflow { lhs: a, rhs: b })
}

/// Sums amounts left to right. An empty sequence sums to zero.
///
/// Stops at the first element whose addition overflows and reports its
/// position.
pub fn sum_lovelace<I>(values: I) -> Result<Lovelace, BalanceError>
where
    I: IntoIterator<Item = Lovelace>,
{
    values
        .into_iter()
        .enumerate()
        .try_fold(Lovelace::ZERO, |total, (index, value)| {
            total
                .checked_add(&value)
                .ok_or(BalanceError::SumOverflow { index })
        })
}

/// Failure to convert an ADA quantity into Lovelace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversionError {
    Negative,
    NotANumber,
    OutOfRange,
    InvalidFormat,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Negative => write!(f, "ADA amount must be non-negative"),
            ConversionError::NotANumber => write!(f, "ADA amount is not a number"),
            ConversionError::OutOfRange => {
                write!(f, "ADA amount does not fit in a 64-bit Lovelace count")
            }
            ConversionError::InvalidFormat => write!(f, "malformed decimal ADA amount"),
        }
    }
}

impl error::Error for ConversionError {}

/// A type for balance violations in Lovelace addition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BalanceError {
    /// `lhs + rhs` does not fit in a `u64`.
    Overflow { lhs: Lovelace, rhs: Lovelace },
    /// The running total overflowed when adding the element at `index`.
    SumOverflow { index: usize },
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceError::Overflow { lhs, rhs } => {
                write!(f, "overflow adding {} + {}", lhs.0, rhs.0)
            }
            BalanceError::SumOverflow { index } => {
                write!(f, "sum overflowed at element {}", index)
            }
        }
    }
}

impl error::Error for BalanceError {}

#[cfg(any(test, feature = "test-dependencies"))]
pub mod testing {
    use proptest::prelude::prop_compose;

    use super::Lovelace;

    prop_compose! {
        pub fn arb_lovelace()(amt in 0u64..=u64::MAX) -> Lovelace {
            Lovelace::from_u64(amt)
        }
    }

    prop_compose! {
        /// Amounts below 2^31 Lovelace, where an `f64` round trip through
        /// ADA stays within a millionth of a Lovelace.
        pub fn arb_float_exact_lovelace()(amt in 0u64..(1 << 31)) -> Lovelace {
            Lovelace::from_u64(amt)
        }
    }
}
