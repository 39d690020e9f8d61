//! Ordering and drag-reorder reconciliation.
//!
//! Every reorderable collection in the dashboard (todos, quick links, app
//! shortcuts, AI tools) carries the same pair of fields: a string `id` and an
//! integer `order`. This module owns the single canonical reconciliation
//! algorithm applied to all of them:
//!
//! - after any structural mutation the collection is re-densified so `order`
//!   values form exactly `0..N-1` with relative ordering preserved;
//! - a drag-and-drop removes the dragged item and reinserts it immediately
//!   before the drop target, then re-densifies.
//!
//! The splice is idempotent with respect to the final arrangement: dropping
//! the same item on the same target twice leaves the collection exactly where
//! one drop put it.

/// An item that participates in order-based sequencing.
///
/// `order` is purely a display sequence, never an identity; `id` is the
/// identity. Collections are expected to keep orders dense (`0..N-1`), which
/// [`reindex`] enforces after every mutation.
pub trait Ordered {
    /// Stable identity of the item within its collection.
    fn id(&self) -> &str;

    /// Current display position.
    fn order(&self) -> usize;

    /// Overwrite the display position.
    fn set_order(&mut self, order: usize);
}

/// Reassigns `order = index` across the whole slice.
///
/// Call after any add, delete or reorder so that order values are a dense,
/// gap-free `0..N-1` sequence in the slice's current arrangement.
pub fn reindex<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index);
    }
}

/// Sorts the slice by its `order` field (ties keep insertion order).
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

/// Applies a drag-and-drop: moves `dragged_id` immediately before
/// `target_id`, then re-densifies every order value.
///
/// Returns `true` if the collection changed. Unknown ids or a drop onto the
/// dragged item itself leave the collection untouched. The target position is
/// located after the dragged item has been removed, which is what makes a
/// repeated identical drop a no-op.
pub fn splice_reorder<T: Ordered>(items: &mut Vec<T>, dragged_id: &str, target_id: &str) -> bool {
    if dragged_id == target_id {
        return false;
    }
    let Some(dragged_index) = items.iter().position(|i| i.id() == dragged_id) else {
        return false;
    };
    if !items.iter().any(|i| i.id() == target_id) {
        return false;
    }

    let dragged = items.remove(dragged_index);
    let insert_at = items
        .iter()
        .position(|i| i.id() == target_id)
        .unwrap_or(items.len());
    let changed = insert_at != dragged_index;
    items.insert(insert_at, dragged);
    reindex(items);
    changed
}
