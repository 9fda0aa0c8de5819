//! Domain data: identifiers, entities and the DTOs used to create and patch them.
//!
//! Each entity is managed by its own actor; the [`ActorEntity`](actor_framework::ActorEntity)
//! implementations live next to the actors (`crate::inventory_actor::entity`, ...).

/// Declares a `u32` newtype id that the actor runtime can allocate (`From<u32>`)
/// and that displays as `<prefix>_<n>` in logs.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod address;
pub mod cart;
pub mod customer;
pub mod order;
pub mod variation;

pub use address::*;
pub use cart::*;
pub use customer::*;
pub use order::*;
pub use variation::*;

entity_id!(
    /// Staff member who keyed in a POS order. Opaque to this crate.
    EmployeeId,
    "employee"
);

entity_id!(
    /// Payment method reference. Opaque to this crate.
    PaymentMethodId,
    "payment_method"
);

impl PaymentMethodId {
    /// Cash, the method used when a checkout names none.
    pub const CASH: PaymentMethodId = PaymentMethodId(5);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_with_prefix() {
        assert_eq!(VariationId(7).to_string(), "variation_7");
        assert_eq!(OrderId::from(3).to_string(), "order_3");
        assert_eq!(PaymentMethodId::CASH.to_string(), "payment_method_5");
    }
}
