//! Product variations and their stock counters.
//!
//! A [`Variation`] is the purchasable unit: its own SKU, price and stock. `quantity` is what
//! is still available; `sold` is the running total that left the shelf. The counters are
//! only changed through the ledger methods below, which the inventory actor calls one
//! request at a time.
use crate::inventory_actor::{InventoryError, StockLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

entity_id!(VariationId, "variation");
entity_id!(
    /// The catalog product a variation belongs to. Products themselves are not managed here.
    ProductId,
    "product"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub sold: u32,
    pub status: VariationStatus,
}

impl Variation {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel {
            variation_id: self.id,
            available: self.quantity,
            sold: self.sold,
        }
    }

    /// Takes `qty` units off the shelf for an order.
    pub fn reserve(&mut self, qty: u32) -> Result<StockLevel, InventoryError> {
        if qty == 0 {
            return Err(InventoryError::InvalidQuantity(qty));
        }
        if qty > self.quantity {
            return Err(InventoryError::InsufficientStock {
                variation_id: self.id,
                requested: qty,
                available: self.quantity,
            });
        }
        self.quantity -= qty;
        self.sold = self.sold.saturating_add(qty);
        Ok(self.stock_level())
    }

    /// Puts `qty` units back, undoing a reservation.
    pub fn release(&mut self, qty: u32) -> Result<StockLevel, InventoryError> {
        self.quantity = self
            .quantity
            .checked_add(qty)
            .ok_or(InventoryError::InvalidQuantity(qty))?;
        if qty > self.sold {
            warn!(variation_id = %self.id, qty, sold = self.sold, "Release exceeds sold, clamping");
        }
        self.sold = self.sold.saturating_sub(qty);
        Ok(self.stock_level())
    }

    /// Manual correction of the shelf count. A negative delta is booked as a sale.
    pub fn adjust(&mut self, delta: i64) -> Result<StockLevel, InventoryError> {
        let quantity = i64::from(self.quantity)
            .checked_add(delta)
            .and_then(|next| u32::try_from(next).ok())
            .ok_or(InventoryError::InvalidAdjustment {
                variation_id: self.id,
                delta,
                available: self.quantity,
            })?;
        if delta < 0 {
            let taken = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
            self.sold = self.sold.saturating_add(taken);
        }
        self.quantity = quantity;
        Ok(self.stock_level())
    }
}

/// Payload for registering a new variation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationCreate {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub status: VariationStatus,
}

/// Admin patch. Stock is deliberately absent: it only moves through reserve, release
/// and adjust.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariationUpdate {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<VariationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn variation(quantity: u32) -> Variation {
        Variation {
            id: VariationId(1),
            product_id: ProductId(1),
            sku: "TSHIRT-RED-M".to_string(),
            name: "Red / M".to_string(),
            price: dec!(100.00),
            quantity,
            sold: 0,
            status: VariationStatus::Active,
        }
    }

    #[test]
    fn test_reserve_moves_units_to_sold() {
        let mut v = variation(5);
        let level = v.reserve(2).unwrap();
        assert_eq!((level.available, level.sold), (3, 2));
    }

    #[test]
    fn test_reserve_rejects_overdraw() {
        let mut v = variation(2);
        let err = v.reserve(3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                variation_id: VariationId(1),
                requested: 3,
                available: 2
            }
        );
        assert_eq!(v.quantity, 2);
        assert!(matches!(v.reserve(0), Err(InventoryError::InvalidQuantity(0))));
    }

    #[test]
    fn test_release_clamps_sold_at_zero() {
        let mut v = variation(0);
        v.sold = 1;
        let level = v.release(4).unwrap();
        assert_eq!((level.available, level.sold), (4, 0));
    }

    #[test]
    fn test_adjust_books_negative_delta_as_sale() {
        let mut v = variation(10);
        v.adjust(-4).unwrap();
        assert_eq!((v.quantity, v.sold), (6, 4));

        v.adjust(5).unwrap();
        assert_eq!((v.quantity, v.sold), (11, 4));
    }

    #[test]
    fn test_adjust_below_zero_is_rejected() {
        let mut v = variation(3);
        let err = v.adjust(-4).unwrap_err();
        assert!(matches!(err, InventoryError::InvalidAdjustment { delta: -4, available: 3, .. }));
        assert_eq!((v.quantity, v.sold), (3, 0));
    }
}
