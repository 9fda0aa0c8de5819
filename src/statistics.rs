//! Order statistics over a date window.
//!
//! `cancelled_orders` is reported as every order in the window that is not completed, so
//! pending and processing orders are counted with the cancelled ones. Dashboards built on
//! these numbers expect that, so it is kept.
use crate::model::{Order, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatistics {
    pub total_orders: usize,
    /// Sum of `total_amount` over every order that was not cancelled.
    pub total_revenue: Decimal,
    pub completed_orders: usize,
    pub cancelled_orders: usize,
}

pub fn summarize<'a>(orders: impl IntoIterator<Item = &'a Order>) -> OrderStatistics {
    let mut stats = OrderStatistics::default();
    for order in orders {
        stats.total_orders += 1;
        if order.status != OrderStatus::Cancelled {
            stats.total_revenue += order.total_amount;
        }
        if order.status == OrderStatus::Completed {
            stats.completed_orders += 1;
        }
    }
    stats.cancelled_orders = stats.total_orders - stats.completed_orders;
    stats
}
