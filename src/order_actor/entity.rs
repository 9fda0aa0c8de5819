//! [`ActorEntity`] implementation for [`Order`].

use super::{OrderAction, OrderContext, OrderError};
use crate::model::{
    CustomerId, Order, OrderCreate, OrderId, OrderLine, OrderStatus, OrderUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

impl Order {
    /// Customer-scoped actions only see the customer's own orders.
    fn check_owner(&self, customer_id: Option<CustomerId>) -> Result<(), OrderError> {
        match customer_id {
            Some(customer_id) if !self.is_owned_by(customer_id) => {
                Err(OrderError::NotFound(self.id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let now = Utc::now();
        let mut lines = Vec::with_capacity(params.lines.len());
        for (line_no, draft) in (1u32..).zip(params.lines) {
            if draft.quantity == 0 {
                return Err(OrderError::InvalidQuantity { line_no });
            }
            if draft.unit_price.is_sign_negative() {
                return Err(OrderError::InvalidPrice { line_no });
            }
            lines.push(OrderLine {
                line_no,
                order_id: id,
                variation_id: draft.variation_id,
                quantity: draft.quantity,
                unit_price: draft.unit_price,
                price: draft.unit_price * Decimal::from(draft.quantity),
                status: OrderStatus::Pending,
                created_at: now,
            });
        }
        let total: Decimal = lines.iter().map(|line| line.price).sum();

        Ok(Self {
            id,
            customer_id: params.customer_id,
            employee_id: params.employee_id,
            address_id: params.address_id,
            payment_method_id: params.payment_method_id,
            note: params.note,
            order_type: params.order_type,
            total_amount: total,
            total_payment: total,
            status: OrderStatus::Pending,
            created_at: now,
            order_date: now,
            payment_date: None,
            lines,
        })
    }

    /// Reserves stock for all lines at once; the order is only stored if this succeeds.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let levels = ctx.inventory.reserve_all(&self.stock_lines()).await?;
        info!(order_id = %self.id, lines = levels.len(), total = %self.total_amount, "Stock reserved");
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if self.status.is_final() {
            return Err(OrderError::OrderFinalized(self.id));
        }
        if let Some(next) = update.status {
            if next != self.status {
                if !self.status.can_advance_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                self.status = next;
            }
        }
        if let Some(note) = update.note {
            self.note = Some(note);
        }
        if let Some(payment_date) = update.payment_date {
            self.payment_date = Some(payment_date);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Cancel { requested_by } => {
                self.check_owner(requested_by)?;
                if self.status.is_final() {
                    return Err(OrderError::AlreadyFinalized(self.id));
                }
                let released = ctx.inventory.release_all(&self.stock_lines()).await?;
                self.finalize(OrderStatus::Cancelled);
                info!(order_id = %self.id, lines = released.len(), "Stock released");
            }
            OrderAction::ConfirmReceived { customer_id } => {
                self.check_owner(Some(customer_id))?;
                if self.status.is_final() {
                    return Err(OrderError::OrderFinalized(self.id));
                }
                if self.status != OrderStatus::Processing {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: OrderStatus::Completed,
                    });
                }
                self.finalize(OrderStatus::Completed);
            }
            OrderAction::Reconcile => {
                if self.reconcile() {
                    debug!(order_id = %self.id, status = %self.status, "Line statuses reconciled");
                }
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderLineDraft, VariationId};
    use rust_decimal_macros::dec;

    fn draft(variation: u32, quantity: u32, unit_price: Decimal) -> OrderLineDraft {
        OrderLineDraft {
            variation_id: VariationId(variation),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_totals_are_line_sum() {
        let params = OrderCreate {
            lines: vec![draft(1, 2, dec!(100.00)), draft(2, 3, dec!(19.99))],
            ..Default::default()
        };
        let order = Order::from_create_params(OrderId(1), params).unwrap();

        assert_eq!(order.lines[0].price, dec!(200.00));
        assert_eq!(order.lines[1].price, dec!(59.97));
        assert_eq!(order.total_amount, dec!(259.97));
        assert_eq!(order.total_payment, order.total_amount);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, order.order_date);
        assert_eq!(
            order.lines.iter().map(|l| l.line_no).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_rejects_empty_and_zero_lines() {
        let empty = Order::from_create_params(OrderId(1), OrderCreate::default());
        assert_eq!(empty.unwrap_err(), OrderError::EmptyOrder);

        let params = OrderCreate {
            lines: vec![draft(1, 1, dec!(5)), draft(2, 0, dec!(5))],
            ..Default::default()
        };
        assert_eq!(
            Order::from_create_params(OrderId(1), params).unwrap_err(),
            OrderError::InvalidQuantity { line_no: 2 }
        );
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let params = OrderCreate {
            lines: vec![draft(1, 1, dec!(5)), draft(2, 1, dec!(5))],
            ..Default::default()
        };
        let mut order = Order::from_create_params(OrderId(1), params).unwrap();
        assert!(!order.reconcile(), "open orders are left alone");

        order.status = OrderStatus::Completed;
        assert!(order.reconcile());
        assert!(!order.reconcile());
        assert!(order.lines.iter().all(|l| l.status == OrderStatus::Completed));
    }
}
