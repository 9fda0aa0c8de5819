//! Custom actions for the Order actor. Every action answers with the order as stored
//! afterwards.

use crate::model::CustomerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Cancels the order and puts its stock back.
    ///
    /// `requested_by` is set when a customer cancels; the order must then be theirs.
    Cancel { requested_by: Option<CustomerId> },
    /// The customer confirms delivery of a `PROCESSING` order, completing it.
    ConfirmReceived { customer_id: CustomerId },
    /// Brings line statuses in line with a finalized order.
    Reconcile,
}
