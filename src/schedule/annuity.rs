use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// level monthly payment amortizing `principal` over `months` at `monthly_rate`
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)`, rounded half up to cents.
/// A zero rate degenerates to `P / n`. When `(1 + r)^n` leaves the decimal
/// range the payment is `P * r`, which it equals to far below a cent there.
/// Fails only when `P * r` itself is out of range.
pub fn payment(principal: Money, monthly_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Ok(principal);
    }

    let r = monthly_rate.as_decimal();
    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let overflow = || LoanError::PaymentOverflow { principal, months };
    let interest_only = principal.as_decimal().checked_mul(r).ok_or_else(overflow)?;

    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        match compound.checked_mul(base) {
            Some(next) => compound = next,
            None => return Ok(Money::from_decimal(interest_only)),
        }
    }

    let denominator = compound - Decimal::ONE;
    let amount = match interest_only.checked_mul(compound) {
        Some(numerator) => numerator.checked_div(denominator),
        None => compound
            .checked_div(denominator)
            .and_then(|ratio| interest_only.checked_mul(ratio)),
    }
    .ok_or_else(overflow)?;

    Ok(Money::from_decimal(amount))
}

/// interest for one month on `balance`, rounded half up to cents
pub fn monthly_interest(balance: Money, monthly_rate: Rate) -> Money {
    balance * monthly_rate.as_decimal()
}
