//! Property tests for the cart store.

use proptest::prelude::*;
use storefront_commerce::prelude::*;

const IDS: [&str; 3] = ["1", "2", "3"];
const SIZES: [&str; 3] = ["S", "M", "L"];

#[derive(Debug, Clone)]
enum Op {
    Add { id: usize, size: usize, price: i64 },
    Set { id: usize, size: usize, quantity: i64 },
    Remove { id: usize, size: usize },
    Increment { id: usize, size: usize },
    Decrement { id: usize, size: usize },
}

fn arb_op() -> impl Strategy<Value = Op> {
    let id = 0..IDS.len();
    let size = 0..SIZES.len();
    prop_oneof![
        3 => (id.clone(), size.clone(), 0i64..100_000)
            .prop_map(|(id, size, price)| Op::Add { id, size, price }),
        1 => (id.clone(), size.clone(), -3i64..20)
            .prop_map(|(id, size, quantity)| Op::Set { id, size, quantity }),
        1 => (id.clone(), size.clone()).prop_map(|(id, size)| Op::Remove { id, size }),
        1 => (id.clone(), size.clone()).prop_map(|(id, size)| Op::Increment { id, size }),
        1 => (id, size).prop_map(|(id, size)| Op::Decrement { id, size }),
    ]
}

fn apply(store: &mut CartStore, op: &Op) {
    match *op {
        Op::Add { id, size, price } => {
            store.add(IDS[id], format!("Product {}", IDS[id]), Money::new(price, Currency::RUB), SIZES[size]);
        }
        Op::Set { id, size, quantity } => {
            store.set_quantity(&ProductId::new(IDS[id]), SIZES[size], quantity);
        }
        Op::Remove { id, size } => {
            store.remove(&ProductId::new(IDS[id]), SIZES[size]);
        }
        Op::Increment { id, size } => {
            store.increment(&ProductId::new(IDS[id]), SIZES[size]);
        }
        Op::Decrement { id, size } => {
            store.decrement(&ProductId::new(IDS[id]), SIZES[size]);
        }
    }
}

fn build(ops: &[Op]) -> CartStore {
    let mut store = CartStore::new(Currency::RUB);
    for op in ops {
        apply(&mut store, op);
    }
    store
}

proptest! {
    /// Repeated adds of one pair collapse into a single line.
    #[test]
    fn prop_repeated_add_merges(count in 1usize..50) {
        let mut store = CartStore::new(Currency::RUB);
        for _ in 0..count {
            store.add("1", "Tee", Money::new(8990, Currency::RUB), "M");
        }

        let matching: Vec<_> = store
            .items()
            .iter()
            .filter(|i| i.matches(&ProductId::new("1"), "M"))
            .collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].quantity, count as i64);
    }

    /// A positive quantity replaces the existing one exactly.
    #[test]
    fn prop_set_quantity_stores_value(quantity in 1i64..i64::MAX) {
        let mut store = CartStore::new(Currency::RUB);
        store.add("1", "Tee", Money::new(8990, Currency::RUB), "M");
        let snapshot = store.set_quantity(&ProductId::new("1"), "M", quantity);
        prop_assert_eq!(snapshot.items[0].quantity, quantity);
    }

    /// No sequence of operations breaks the identity invariant or leaves a
    /// non-positive quantity behind.
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(arb_op(), 0..60)) {
        let store = build(&ops);
        let items = store.items();

        for (i, a) in items.iter().enumerate() {
            prop_assert!(a.quantity >= 1);
            for b in &items[i + 1..] {
                prop_assert!(!(a.product_id == b.product_id && a.size == b.size));
            }
        }
    }

    /// Totals always equal a recomputation from the line items.
    #[test]
    fn prop_totals_match_recomputation(ops in prop::collection::vec(arb_op(), 0..60)) {
        let store = build(&ops);
        let expected_items: i64 = store.items().iter().map(|i| i.quantity).sum();
        let expected_price: i64 = store
            .items()
            .iter()
            .map(|i| i.unit_price.amount_cents * i.quantity)
            .sum();

        prop_assert_eq!(store.totals().as_tuple(), (expected_items, expected_price));
        prop_assert_eq!(store.snapshot().totals, store.totals());
    }

    /// Setting an existing line to zero removes exactly that line.
    #[test]
    fn prop_set_zero_removes_one(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut store = build(&ops);
        if let Some(first) = store.items().first().cloned() {
            let len_before = store.len();
            store.set_quantity(&first.product_id, &first.size, 0);
            prop_assert_eq!(store.len(), len_before - 1);
            prop_assert!(store.get(&first.product_id, &first.size).is_none());
        }
    }

    /// Removing an absent pair changes nothing.
    #[test]
    fn prop_remove_absent_is_noop(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = build(&ops);
        let before = store.items().to_vec();
        store.remove(&ProductId::new("absent"), "M");
        store.remove(&ProductId::new("absent"), "M");
        prop_assert_eq!(store.items(), before.as_slice());
    }

    /// Clearing always zeroes the totals.
    #[test]
    fn prop_clear_zeroes_totals(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = build(&ops);
        store.clear();
        prop_assert_eq!(store.totals().as_tuple(), (0, 0));
        prop_assert!(store.is_empty());
    }
}
