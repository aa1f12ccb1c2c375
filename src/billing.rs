//! Monthly charges and payments.
//!
//! Charges are `rate(category) * lengthFeet`. Payments may clear a balance
//! but never push it below zero.

use crate::boat::{Boat, PlacementCategory};
use crate::error::{MarinaError, Result};
use crate::money::Money;
use rust_decimal::Decimal;

/// Monthly rate per foot of boat length for a placement category.
pub fn rate(category: PlacementCategory) -> Decimal {
    match category {
        PlacementCategory::Slip => Decimal::new(125, 1),
        PlacementCategory::Land => Decimal::new(140, 1),
        PlacementCategory::Trailer => Decimal::new(250, 1),
        PlacementCategory::Storage => Decimal::new(112, 1),
        PlacementCategory::None => Decimal::ZERO,
    }
}

/// The charge a boat accrues for one month.
pub fn monthly_charge(boat: &Boat) -> Money {
    Money::per_foot(rate(boat.placement()), boat.length_feet())
}

/// Adds one month's charge to the boat's balance and returns the charge.
///
/// Not idempotent: calling it twice in a billing period bills twice.
/// Fails with [`MarinaError::BalanceOverflow`] if the new balance cannot be
/// represented; the balance is left unchanged in that case.
pub fn apply_monthly_charge(boat: &mut Boat) -> Result<Money> {
    let charge = monthly_charge(boat);
    boat.charge(charge)?;
    Ok(charge)
}

/// Takes a payment against the boat's balance and returns the new balance.
///
/// Fails with [`MarinaError::PaymentExceedsBalance`] when `amount` is more
/// than what is owed; the balance is left unchanged in that case.
pub fn accept_payment(boat: &mut Boat, amount: Money) -> Result<Money> {
    if amount.is_negative() {
        return Err(MarinaError::NegativePayment { amount });
    }

    if !boat.pay(amount) {
        return Err(MarinaError::PaymentExceedsBalance {
            amount,
            owed: boat.amount_owed(),
        });
    }

    Ok(boat.amount_owed())
}
