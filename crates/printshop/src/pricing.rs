//! Placeholder pricing and receipt numbering.
//!
//! Prices are one uniform draw per batch multiplied by the file count.
//! Receipt numbers are display codes and may collide.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::error::PricingError;

/// Base price range per batch, inclusive.
pub const BASE_PRICE_RANGE: RangeInclusive<u32> = 10..=200;

/// Random component of a receipt number, inclusive.
pub const RECEIPT_SERIAL_RANGE: RangeInclusive<u32> = 1..=999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub base_price: u32,
    pub file_count: u32,
    pub total: u32,
}

#[derive(Debug, Clone)]
pub struct PricingPolicy {
    base_price: RangeInclusive<u32>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            base_price: BASE_PRICE_RANGE,
        }
    }
}

impl PricingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a base price and multiplies it by `file_count`.
    ///
    /// Fails rather than clamping when the total does not fit in a `u32`.
    pub fn quote<R: Rng + ?Sized>(
        &self,
        file_count: usize,
        rng: &mut R,
    ) -> Result<PriceQuote, PricingError> {
        let file_count =
            u32::try_from(file_count).map_err(|_| PricingError::TooManyFiles { file_count })?;
        let base_price = rng.gen_range(self.base_price.clone());
        let total = base_price
            .checked_mul(file_count)
            .ok_or(PricingError::Overflow {
                base_price,
                file_count,
            })?;
        Ok(PriceQuote {
            base_price,
            file_count,
            total,
        })
    }

    /// Formats `PR-<year>-<NNN>` with a zero-padded serial in 1..=999.
    pub fn receipt_number<R: Rng + ?Sized>(&self, year: i32, rng: &mut R) -> String {
        let serial = rng.gen_range(RECEIPT_SERIAL_RANGE);
        format!("PR-{:04}-{:03}", year, serial)
    }
}
