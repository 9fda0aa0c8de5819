//! Orders and their line snapshots.
//!
//! An order owns its lines. Lines are written once, when the order is created, and copy the
//! unit price at that moment; later catalog price changes never touch them.
//!
//! ## Status machine
//!
//! ```text
//! PENDING ──► PROCESSING ──► COMPLETED
//!    │             │
//!    └─────────────┴──────► CANCELLED
//! ```
//!
//! `COMPLETED` and `CANCELLED` are final. Line statuses follow the order once it is final
//! (see [`Order::reconcile`]).
use super::{AddressId, CustomerId, EmployeeId, PaymentMethodId, Variation, VariationId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

entity_id!(OrderId, "order");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Forward moves allowed by a status patch. Cancellation has its own path.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Processing)
                | (OrderStatus::Processing, OrderStatus::Completed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Case-insensitive: `pending`, `Pending` and `PENDING` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderType {
    /// Keyed in at the counter by staff.
    #[default]
    #[serde(rename = "POS")]
    Pos,
    /// Placed by a customer through checkout.
    Online,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 1-based position within the order.
    pub line_no: u32,
    pub order_id: OrderId,
    /// Soft reference: the variation may have been deleted since the sale.
    pub variation_id: VariationId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// An order line with the name of the variation it sold, if that variation still exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineView {
    #[serde(flatten)]
    pub line: OrderLine,
    pub variation_name: Option<String>,
}

impl OrderLineView {
    pub fn new(line: OrderLine, variation: Option<&Variation>) -> Self {
        Self {
            line,
            variation_name: variation.map(|v| v.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: Option<CustomerId>,
    pub employee_id: Option<EmployeeId>,
    pub address_id: Option<AddressId>,
    pub payment_method_id: PaymentMethodId,
    pub note: Option<String>,
    pub order_type: OrderType,
    pub total_amount: Decimal,
    pub total_payment: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub order_date: DateTime<Utc>,
    pub payment_date: Option<DateTime<Utc>>,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Moves every line to the order's final status. Returns true if a line changed.
    ///
    /// No-op while the order is still open.
    pub fn reconcile(&mut self) -> bool {
        if !self.status.is_final() {
            return false;
        }
        let status = self.status;
        let mut changed = false;
        for line in self.lines.iter_mut().filter(|line| line.status != status) {
            line.status = status;
            changed = true;
        }
        changed
    }

    /// Sets the order and all of its lines to `status`.
    pub fn finalize(&mut self, status: OrderStatus) {
        self.status = status;
        for line in &mut self.lines {
            line.status = status;
        }
    }

    /// `(variation, quantity)` per line. Variations deleted since the sale are still listed;
    /// releasing them is skipped by the inventory.
    pub fn stock_lines(&self) -> Vec<(VariationId, u32)> {
        self.lines
            .iter()
            .map(|line| (line.variation_id, line.quantity))
            .collect()
    }

    pub fn is_owned_by(&self, customer_id: CustomerId) -> bool {
        self.customer_id == Some(customer_id)
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineDraft {
    pub variation_id: VariationId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: Option<CustomerId>,
    pub employee_id: Option<EmployeeId>,
    pub address_id: Option<AddressId>,
    pub payment_method_id: PaymentMethodId,
    pub note: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    pub lines: Vec<OrderLineDraft>,
}

/// Admin patch. Only these three fields are mutable, and only while the order is open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub note: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

/// An order as shown to a reader: reconciled, with the shipping address spelled out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: Order,
    pub shipping_address: Option<String>,
}

/// Listing filter. Every field is optional; the date bounds are inclusive and apply to
/// `order_date`.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<CustomerId>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |s| order.status == s)
            && self.customer_id.map_or(true, |c| order.customer_id == Some(c))
            && self.start.map_or(true, |start| order.order_date >= start)
            && self.end.map_or(true, |end| order.order_date <= end)
    }
}
