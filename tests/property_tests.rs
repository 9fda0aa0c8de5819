//! Property-based tests for the stock ledger and order arithmetic.
//!
//! These check invariants over arbitrary inputs rather than hand-picked cases.

use actor_framework::ActorEntity;
use proptest::prelude::*;
use rust_decimal::Decimal;
use storefront_ledger::model::*;

fn variation(quantity: u32, sold: u32) -> Variation {
    Variation {
        id: VariationId(1),
        product_id: ProductId(1),
        sku: "SKU-1".to_string(),
        name: "Variation".to_string(),
        price: Decimal::new(1000, 2),
        quantity,
        sold,
        status: VariationStatus::Active,
    }
}

#[derive(Debug, Clone)]
enum Op {
    Reserve(u32),
    Release(u32),
    Adjust(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..50u32).prop_map(Op::Reserve),
        (0..50u32).prop_map(Op::Release),
        (-50..50i64).prop_map(Op::Adjust),
    ]
}

// ============================================================================
// Property: reserve succeeds exactly when stock covers it, and failures change nothing
// ============================================================================

proptest! {
    #[test]
    fn test_reserve_only_within_stock(quantity in 0..100u32, sold in 0..100u32, qty in 0..150u32) {
        let mut v = variation(quantity, sold);
        let before = v.clone();

        match v.reserve(qty) {
            Ok(level) => {
                prop_assert!(qty > 0 && qty <= quantity);
                prop_assert_eq!(level.available, quantity - qty);
                prop_assert_eq!(level.sold, sold + qty);
            }
            Err(_) => {
                prop_assert!(qty == 0 || qty > quantity);
                prop_assert_eq!(v, before);
            }
        }
    }

    /// Property: releasing what was reserved restores both counters
    #[test]
    fn test_release_undoes_reserve(quantity in 1..100u32, sold in 0..100u32, pick in 1..100u32) {
        let qty = pick.min(quantity);
        let mut v = variation(quantity, sold);

        v.reserve(qty).unwrap();
        v.release(qty).unwrap();

        prop_assert_eq!((v.quantity, v.sold), (quantity, sold));
    }

    /// Property: adjust fails exactly when the shelf would go below zero
    #[test]
    fn test_adjust_never_goes_negative(quantity in 0..100u32, delta in -200..200i64) {
        let mut v = variation(quantity, 0);
        let result = v.adjust(delta);

        if i64::from(quantity) + delta < 0 {
            prop_assert!(result.is_err());
            prop_assert_eq!(v.quantity, quantity);
        } else {
            prop_assert_eq!(i64::from(result.unwrap().available), i64::from(quantity) + delta);
        }
    }

    /// Property: only a positive adjustment changes available + sold
    #[test]
    fn test_random_ledger_ops_conserve_units(
        quantity in 0..100u32,
        ops in prop::collection::vec(op(), 0..40)
    ) {
        let mut v = variation(quantity, 0);
        let mut expected = i64::from(quantity);

        for op in ops {
            match op {
                Op::Reserve(n) => {
                    let _ = v.reserve(n);
                }
                Op::Release(n) => {
                    // Only put back units that were actually sold.
                    let _ = v.release(n.min(v.sold));
                }
                Op::Adjust(d) => {
                    if v.adjust(d).is_ok() && d > 0 {
                        expected += d;
                    }
                }
            }
            prop_assert_eq!(i64::from(v.quantity) + i64::from(v.sold), expected);
        }
    }

    /// Property: an order's total is the sum of its line prices
    #[test]
    fn test_order_total_is_line_sum(
        lines in prop::collection::vec((1..20u32, 0..100_000i64), 1..10)
    ) {
        let drafts: Vec<OrderLineDraft> = lines
            .iter()
            .enumerate()
            .map(|(i, &(quantity, cents))| OrderLineDraft {
                variation_id: VariationId(i as u32 + 1),
                quantity,
                unit_price: Decimal::new(cents, 2),
            })
            .collect();
        let params = OrderCreate {
            lines: drafts,
            ..Default::default()
        };

        let order = Order::from_create_params(OrderId(1), params).unwrap();
        let sum: Decimal = order.lines.iter().map(|l| l.price).sum();
        prop_assert_eq!(order.total_amount, sum);
        for (line, &(quantity, cents)) in order.lines.iter().zip(&lines) {
            prop_assert_eq!(line.price, Decimal::new(cents, 2) * Decimal::from(quantity));
        }
    }

    /// Property: shipping labels never contain empty segments
    #[test]
    fn test_shipping_label_has_no_blank_parts(
        parts in prop::collection::vec(prop::option::of("[ a-z]{0,8}"), 4)
    ) {
        let address = Address {
            street: parts[0].clone(),
            ward: parts[1].clone(),
            district: parts[2].clone(),
            province: parts[3].clone(),
            ..Default::default()
        };
        let label = address.shipping_label();
        if !label.is_empty() {
            prop_assert!(label.split(", ").all(|part| !part.trim().is_empty()));
        }
    }
}
