use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

/// decimal places every persisted money amount is held at
pub const MONEY_DP: u32 = 2;

/// round half up: `floor(value * 10^dp + 0.5) / 10^dp`
///
/// Midpoints always move toward positive infinity, for negative values too,
/// so -1.005 becomes -1.00 and 1.005 becomes 1.01.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy)
}

/// Money type held at cent precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal, rounding half up to cents
    pub fn from_decimal(d: Decimal) -> Self {
        Money(round_half_up(d, MONEY_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount (dollars, euros, zloty)
    pub fn from_major(amount: i64) -> Self {
        let mut d = Decimal::from(amount);
        d.rescale(MONEY_DP);
        Money(d)
    }

    /// create from minor amount in cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_DP))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_decimal(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_decimal(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        *self = *self - other;
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money::from_decimal(self.0 * other)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money::from_decimal(self.0 / other)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// annual interest rate as a fraction (0.05 for 5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from basis points (e.g., 758 for 7.58%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// monthly rate from annual rate, equal monthly periods
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_positive() {
        assert_eq!(round_half_up(dec!(1.005), 2), dec!(1.01));
        assert_eq!(round_half_up(dec!(2.675), 2), dec!(2.68));
        assert_eq!(round_half_up(dec!(2.665), 2), dec!(2.67)); // banker's would give 2.66
        assert_eq!(round_half_up(dec!(1.0049), 2), dec!(1.00));
    }

    #[test]
    fn test_round_half_up_negative() {
        assert_eq!(round_half_up(dec!(-1.005), 2), dec!(-1.00));
        assert_eq!(round_half_up(dec!(-1.006), 2), dec!(-1.01));
        assert_eq!(round_half_up(dec!(-1.5), 0), dec!(-1));
    }

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.125").unwrap();
        assert_eq!(m.to_string(), "100.13");

        let cents = Money::from_cents(56614);
        assert_eq!(cents, Money::from_str_exact("566.14").unwrap());
        assert_eq!(Money::from_major(3).to_string(), "3.00");
    }

    #[test]
    fn test_money_arithmetic_stays_at_cents() {
        let balance = Money::from_major(30_000);
        let interest = balance * (dec!(0.05) / dec!(12));
        assert_eq!(interest, Money::from_str_exact("125.00").unwrap());

        let third = Money::from_major(100) / dec!(3);
        assert_eq!(third, Money::from_cents(3333));

        let total: Money = vec![Money::from_cents(1), Money::from_cents(2)].into_iter().sum();
        assert_eq!(total, Money::from_cents(3));
    }

    #[test]
    fn test_rate_conversions() {
        assert_eq!(Rate::from_percentage(5).as_decimal(), dec!(0.05));
        assert_eq!(Rate::from_bps(758).as_decimal(), dec!(0.0758));
        assert_eq!(Rate::from_percentage(12).monthly_rate().as_decimal(), dec!(0.01));
        assert_eq!(Rate::from_bps(758).to_string(), "7.58%");
    }
}
