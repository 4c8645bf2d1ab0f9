//! The authoritative in-memory collection of items.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use itemstore_core::{DomainError, DomainResult, Entity, IdSequence};

use crate::item::{CreateItem, Item, ItemId, UpdateItem};
use crate::validation;

const ENTITY: &str = "item";

#[derive(Debug, Default)]
struct State {
    // Ids are issued in increasing order, so key order is creation order.
    items: BTreeMap<ItemId, Item>,
    ids: IdSequence,
}

/// Owns every item and the id counter.
///
/// All state sits behind one lock: create/update/delete are atomic with
/// respect to each other, and `list` sees a consistent snapshot. Instances
/// are independent, so tests can build as many as they like.
#[derive(Debug, Default)]
pub struct ItemStore {
    inner: RwLock<State>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, assign the next id, insert, and return a copy.
    pub fn create(&self, req: CreateItem) -> DomainResult<Item> {
        let req = validation::validate_create(req)?;

        let mut state = self.write();
        let id = ItemId::new(state.ids.next_id()).expect("id sequence starts at 1");
        let item = Item::from_valid(id, req);
        let previous = state.items.insert(*item.id(), item.clone());
        debug_assert!(previous.is_none(), "item id {id} issued twice");

        tracing::debug!(item_id = %id, "item created");
        Ok(item)
    }

    pub fn get(&self, id: ItemId) -> DomainResult<Item> {
        self.read()
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Up to `limit` items in creation order, starting at offset `skip`.
    ///
    /// Bounds are the caller's to enforce; a `skip` past the end yields an
    /// empty page.
    pub fn list(&self, skip: usize, limit: usize) -> Vec<Item> {
        self.read()
            .items
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Validate, then apply the fields present in `req`. All-or-nothing: on
    /// any error the stored item is untouched.
    ///
    /// A payload that fails validation is rejected whether or not `id`
    /// exists.
    pub fn update(&self, id: ItemId, req: UpdateItem) -> DomainResult<Item> {
        let req = validation::validate_update(req)?;

        let mut state = self.write();
        let item = state.items.get_mut(&id).ok_or_else(|| not_found(id))?;
        item.apply(req);

        tracing::debug!(item_id = %id, "item updated");
        Ok(item.clone())
    }

    /// Remove an item. Its id is retired for good.
    pub fn delete(&self, id: ItemId) -> DomainResult<()> {
        let removed = self.write().items.remove(&id);
        if removed.is_none() {
            return Err(not_found(id));
        }

        tracing::debug!(item_id = %id, "item deleted");
        Ok(())
    }

    // No operation panics while holding the lock after it starts mutating,
    // so a poisoned guard still protects consistent data.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: ItemId) -> DomainError {
    DomainError::not_found(ENTITY, id.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemstore_core::{Constraint, ValidationError};

    fn id(raw: u64) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    fn store_with(n: usize) -> ItemStore {
        let store = ItemStore::new();
        for i in 1..=n {
            store
                .create(CreateItem::new(format!("Item {i}"), i as f64))
                .unwrap();
        }
        store
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|i| i.id_typed().get()).collect()
    }

    fn count(store: &ItemStore) -> usize {
        store.list(0, usize::MAX).len()
    }

    fn validation_error(err: DomainError) -> ValidationError {
        match err {
            DomainError::Validation(e) => e,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_assigns_sequential_ids_and_trims_name() {
        let store = ItemStore::new();

        let widget = store.create(CreateItem::new("  Widget  ", 9.99)).unwrap();
        assert_eq!(widget.id_typed(), id(1));
        assert_eq!(widget.name(), "Widget");
        assert_eq!(widget.description(), None);
        assert_eq!(widget.price(), 9.99);

        let gadget = store.create(CreateItem::new("Gadget", 1.0)).unwrap();
        assert_eq!(gadget.id_typed(), id(2));
        assert_eq!(count(&store), 2);
    }

    #[test]
    fn create_with_invalid_price_leaves_store_unchanged() {
        let store = store_with(1);

        let err = store.create(CreateItem::new("Broken", 0.0)).unwrap_err();
        assert_eq!(validation_error(err).constraint, Constraint::NotPositive);
        assert_eq!(count(&store), 1);

        // The failed create must not consume an id.
        let next = store.create(CreateItem::new("Next", 1.0)).unwrap();
        assert_eq!(next.id_typed(), id(2));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = store_with(2);
        let err = store.get(id(3)).unwrap_err();
        assert_eq!(err, DomainError::not_found("item", 3));
    }

    #[test]
    fn repeated_get_returns_identical_items() {
        let store = store_with(3);
        let first = store.get(id(2)).unwrap();
        let second = store.get(id(2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn list_pages_in_creation_order() {
        let store = store_with(10);

        assert_eq!(ids(&store.list(3, 4)), vec![4, 5, 6, 7]);
        assert_eq!(ids(&store.list(0, 100)), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&store.list(8, 5)), vec![9, 10]);
        assert!(store.list(20, 5).is_empty());
        assert!(store.list(10, 1).is_empty());
    }

    #[test]
    fn list_on_empty_store_is_empty() {
        let store = ItemStore::new();
        assert!(store.list(0, 10).is_empty());
        assert!(store.list(0, usize::MAX).is_empty());
    }

    #[test]
    fn update_changes_only_present_fields() {
        let store = ItemStore::new();
        store
            .create(CreateItem::new("Widget", 9.99).with_description("blue"))
            .unwrap();

        let updated = store.update(id(1), UpdateItem::default().price(5.0)).unwrap();
        assert_eq!(updated.name(), "Widget");
        assert_eq!(updated.description(), Some("blue"));
        assert_eq!(updated.price(), 5.0);
        assert_eq!(store.get(id(1)).unwrap(), updated);
    }

    #[test]
    fn update_trims_and_can_clear_description() {
        let store = ItemStore::new();
        store
            .create(CreateItem::new("Widget", 9.99).with_description("blue"))
            .unwrap();

        let updated = store
            .update(id(1), UpdateItem::default().name("  Gizmo ").clear_description())
            .unwrap();
        assert_eq!(updated.name(), "Gizmo");
        assert_eq!(updated.description(), None);

        let updated = store
            .update(id(1), UpdateItem::default().description(""))
            .unwrap();
        assert_eq!(updated.description(), Some(""));
    }

    #[test]
    fn failed_update_leaves_item_unchanged() {
        let store = ItemStore::new();
        let original = store.create(CreateItem::new("  Widget  ", 9.99)).unwrap();

        // Price is valid, name is not: nothing may be applied.
        let err = store
            .update(id(1), UpdateItem::default().name("").price(1.0))
            .unwrap_err();
        let err = validation_error(err);
        assert_eq!((err.field, err.constraint), ("name", Constraint::MinLength(1)));

        assert_eq!(store.get(id(1)).unwrap(), original);
    }

    #[test]
    fn update_validates_before_checking_existence() {
        let store = store_with(1);

        let err = store
            .update(id(9), UpdateItem::default().price(-1.0))
            .unwrap_err();
        let err = validation_error(err);
        assert_eq!((err.field, err.constraint), ("price", Constraint::NotPositive));

        let err = store
            .update(id(9), UpdateItem::default().price(2.0))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("item", 9));
    }

    #[test]
    fn empty_update_returns_item_as_is() {
        let store = store_with(1);
        let before = store.get(id(1)).unwrap();
        let after = store.update(id(1), UpdateItem::default()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn delete_retires_the_id() {
        let store = store_with(3);

        store.delete(id(3)).unwrap();
        assert!(matches!(store.get(id(3)), Err(DomainError::NotFound { .. })));
        assert!(matches!(store.delete(id(3)), Err(DomainError::NotFound { .. })));

        let next = store.create(CreateItem::new("After", 1.0)).unwrap();
        assert_eq!(next.id_typed(), id(4));
        assert_eq!(ids(&store.list(0, 10)), vec![1, 2, 4]);
    }

    #[test]
    fn stores_are_independent() {
        let a = store_with(2);
        let b = ItemStore::new();
        let first = b.create(CreateItem::new("Only", 1.0)).unwrap();
        assert_eq!(first.id_typed(), id(1));
        assert_eq!(count(&a), 2);
        assert_eq!(count(&b), 1);
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let store = std::sync::Arc::new(ItemStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| {
                            store
                                .create(CreateItem::new(format!("t{t}-{i}"), 1.0))
                                .unwrap()
                                .id_typed()
                                .get()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=400).collect::<Vec<_>>());
        assert_eq!(ids(&store.list(0, 400)), all);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Create(String, f64),
            Update(u64, Option<String>, Option<f64>),
            Delete(u64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                ("\\PC{0,12}", -5.0f64..50.0).prop_map(|(n, p)| Op::Create(n, p)),
                (1u64..20, proptest::option::of("\\PC{0,12}"), proptest::option::of(-5.0f64..50.0))
                    .prop_map(|(id, n, p)| Op::Update(id, n, p)),
                (1u64..20).prop_map(Op::Delete),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: whatever sequence of operations runs, every stored
            /// item satisfies the field constraints, new ids exceed every id
            /// issued before, and listing stays in ascending id order.
            #[test]
            fn invariants_hold_across_operation_sequences(ops in prop::collection::vec(op(), 1..40)) {
                let store = ItemStore::new();
                let mut highest = 0u64;

                for op in ops {
                    match op {
                        Op::Create(name, price) => {
                            let before = count(&store);
                            match store.create(CreateItem::new(name.clone(), price)) {
                                Ok(item) => {
                                    prop_assert!(item.id_typed().get() > highest);
                                    highest = item.id_typed().get();
                                    prop_assert_eq!(item.name(), name.trim());
                                }
                                Err(_) => prop_assert_eq!(count(&store), before),
                            }
                        }
                        Op::Update(raw, name, price) => {
                            let target = id(raw);
                            let before = store.get(target).ok();
                            let mut req = UpdateItem::default();
                            if let Some(n) = name { req = req.name(n); }
                            if let Some(p) = price { req = req.price(p); }
                            if store.update(target, req).is_err() {
                                prop_assert_eq!(store.get(target).ok(), before);
                            }
                        }
                        Op::Delete(raw) => {
                            let _ = store.delete(id(raw));
                        }
                    }

                    let all = store.list(0, usize::MAX);
                    for item in &all {
                        let len = item.name().chars().count();
                        prop_assert!((1..=100).contains(&len));
                        prop_assert!(item.price() > 0.0);
                        prop_assert!(item.id_typed().get() <= highest);
                    }
                    let listed = ids(&all);
                    let mut sorted = listed.clone();
                    sorted.sort_unstable();
                    sorted.dedup();
                    prop_assert_eq!(listed, sorted);
                }
            }
        }
    }
}
