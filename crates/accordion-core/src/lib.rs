//! Accordion Expansion Coordination
//!
//! Pure state machine behind the `Accordion`/`AccordionItem` components.
//! A `Coordinator` tracks the items registered with one container, which of
//! them are currently expanded, and enforces the container's expansion
//! policy (`Single` or `Multiple`). Every mutating call settles fully before
//! returning and reports the flags it flipped as a batch of [`Change`]s, so
//! the UI layer only has to mirror the batch into the DOM.
//!
//! No wasm dependencies: everything here is host-testable.

/// Stable identity of one registered item.
///
/// Allocated from a per-coordinator monotonic counter, so ids are
/// deterministic and never reused within one container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(u32);

impl ItemId {
    /// Numeric form, used to derive deterministic DOM ids.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Expansion policy of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// At most one item expanded at a time.
    #[default]
    Single,
    /// Any number of items may be expanded simultaneously.
    Multiple,
}

/// A flag flipped during one settling point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Expanded(ItemId),
    Collapsed(ItemId),
}

impl Change {
    /// The item this change applies to.
    pub fn item(self) -> ItemId {
        match self {
            Change::Expanded(id) | Change::Collapsed(id) => id,
        }
    }
}

/// Focus movement between sibling headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nav {
    Prev,
    Next,
    First,
    Last,
}

/// Per-container coordination state.
///
/// `items` keeps document order (registration order), which drives keyboard
/// navigation. `expanded` keeps insertion order, which is the tie-break for
/// the `Multiple -> Single` policy switch: the first-inserted member
/// survives.
#[derive(Clone, Debug, Default)]
pub struct Coordinator {
    mode: Mode,
    next_id: u32,
    items: Vec<(ItemId, bool)>,
    expanded: Vec<ItemId>,
}

impl Coordinator {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Register a new item. New items always start collapsed and do not
    /// affect the expanded set until their own future `expand`.
    pub fn add_item(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push((id, false));
        id
    }

    /// Unregister an item that was structurally removed. An expanded item
    /// is dropped from the expanded set silently, without a `Collapsed`
    /// change: the item is already gone, there is nobody left to notify.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|(item, _)| *item != id);
        self.expanded.retain(|item| *item != id);
        self.items.len() != before
    }

    /// Expand an item. No-op for unknown or already-expanded items. In
    /// `Single` mode every other expanded member is collapsed within the
    /// same settling point, so the call returns with the invariant
    /// `expanded().len() <= 1` already restored.
    pub fn expand(&mut self, id: ItemId) -> Vec<Change> {
        let Some(slot) = self.items.iter_mut().find(|(item, _)| *item == id) else {
            return Vec::new();
        };
        if slot.1 {
            return Vec::new();
        }
        slot.1 = true;
        self.expanded.push(id);
        let mut changes = vec![Change::Expanded(id)];
        if self.mode == Mode::Single && self.expanded.len() > 1 {
            let others: Vec<ItemId> = self
                .expanded
                .iter()
                .copied()
                .filter(|item| *item != id)
                .collect();
            for other in others {
                changes.extend(self.collapse(other));
            }
        }
        changes
    }

    /// Collapse an item. No-op for unknown or already-collapsed items.
    pub fn collapse(&mut self, id: ItemId) -> Vec<Change> {
        let Some(slot) = self.items.iter_mut().find(|(item, _)| *item == id) else {
            return Vec::new();
        };
        if !slot.1 {
            return Vec::new();
        }
        slot.1 = false;
        self.expanded.retain(|item| *item != id);
        vec![Change::Collapsed(id)]
    }

    pub fn toggle(&mut self, id: ItemId) -> Vec<Change> {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Change the expansion policy. Switching `Multiple -> Single` while
    /// several items are expanded keeps the first by insertion order and
    /// collapses the rest.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Change> {
        self.mode = mode;
        if mode == Mode::Single && self.expanded.len() > 1 {
            let survivor = self.expanded[0];
            let rest: Vec<ItemId> = self
                .expanded
                .iter()
                .copied()
                .filter(|item| *item != survivor)
                .collect();
            let mut changes = Vec::new();
            for id in rest {
                changes.extend(self.collapse(id));
            }
            changes
        } else {
            Vec::new()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_expanded(&self, id: ItemId) -> bool {
        self.items
            .iter()
            .any(|(item, expanded)| *item == id && *expanded)
    }

    /// Expanded items in insertion order.
    pub fn expanded(&self) -> &[ItemId] {
        &self.expanded
    }

    /// Registered items in document order.
    pub fn items(&self) -> Vec<ItemId> {
        self.items.iter().map(|(item, _)| *item).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keyboard focus target relative to `id`, over document order.
    /// Never mutates expansion state.
    pub fn neighbor(&self, id: ItemId, nav: Nav) -> Option<ItemId> {
        let pos = self.items.iter().position(|(item, _)| *item == id)?;
        let target = match nav {
            Nav::Prev => pos.checked_sub(1)?,
            Nav::Next => {
                let next = pos + 1;
                if next >= self.items.len() {
                    return None;
                }
                next
            }
            Nav::First => 0,
            Nav::Last => self.items.len() - 1,
        };
        Some(self.items[target].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator_with(mode: Mode, count: usize) -> (Coordinator, Vec<ItemId>) {
        let mut coord = Coordinator::new(mode);
        let ids = (0..count).map(|_| coord.add_item()).collect();
        (coord, ids)
    }

    #[test]
    fn test_single_mode_exclusivity() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 4);

        for &id in &ids {
            coord.expand(id);
            assert_eq!(coord.expanded(), &[id]);
            assert!(coord.expanded().len() <= 1);
        }
    }

    #[test]
    fn test_single_mode_scenario() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 2);
        let (a, b) = (ids[0], ids[1]);

        let changes = coord.expand(a);
        assert_eq!(changes, vec![Change::Expanded(a)]);
        assert!(coord.is_expanded(a));
        assert_eq!(coord.expanded(), &[a]);

        let changes = coord.expand(b);
        assert_eq!(changes, vec![Change::Expanded(b), Change::Collapsed(a)]);
        assert!(!coord.is_expanded(a));
        assert!(coord.is_expanded(b));
        assert_eq!(coord.expanded(), &[b]);
    }

    #[test]
    fn test_multiple_mode_independence() {
        let (mut coord, ids) = coordinator_with(Mode::Multiple, 3);
        let (a, b) = (ids[0], ids[1]);

        coord.expand(a);
        let changes = coord.expand(b);
        assert_eq!(changes, vec![Change::Expanded(b)]);
        assert!(coord.is_expanded(a));
        assert!(coord.is_expanded(b));
        assert_eq!(coord.expanded(), &[a, b]);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 2);
        let a = ids[0];

        let first = coord.expand(a);
        assert_eq!(first.len(), 1);
        let second = coord.expand(a);
        assert!(second.is_empty());
        assert_eq!(coord.expanded(), &[a]);
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 1);
        let a = ids[0];

        assert!(coord.collapse(a).is_empty());
        coord.expand(a);
        assert_eq!(coord.collapse(a), vec![Change::Collapsed(a)]);
        assert!(coord.collapse(a).is_empty());
    }

    #[test]
    fn test_unknown_item_is_noop() {
        let (mut coord, _) = coordinator_with(Mode::Single, 1);
        let mut other = Coordinator::new(Mode::Single);
        other.add_item();
        other.add_item();
        let foreign = other.add_item();

        // An id this coordinator never allocated.
        assert!(coord.expand(foreign).is_empty());
        assert!(coord.collapse(foreign).is_empty());
        assert_eq!(coord.neighbor(foreign, Nav::Next), None);
    }

    #[test]
    fn test_removal_keeps_other_members() {
        let (mut coord, ids) = coordinator_with(Mode::Multiple, 3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        coord.expand(a);
        coord.expand(b);
        coord.expand(c);

        assert!(coord.remove_item(b));
        assert_eq!(coord.expanded(), &[a, c]);
        assert_eq!(coord.len(), 2);
        // Removal is silent: no collapse is observable afterwards either.
        assert!(coord.collapse(b).is_empty());
        // Removing again is a no-op.
        assert!(!coord.remove_item(b));
    }

    #[test]
    fn test_mode_switch_keeps_first_inserted() {
        let (mut coord, ids) = coordinator_with(Mode::Multiple, 3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        coord.expand(a);
        coord.expand(b);
        coord.expand(c);
        assert_eq!(coord.expanded(), &[a, b, c]);

        let changes = coord.set_mode(Mode::Single);
        assert_eq!(changes, vec![Change::Collapsed(b), Change::Collapsed(c)]);
        assert_eq!(coord.expanded(), &[a]);
        assert!(coord.is_expanded(a));
        assert!(!coord.is_expanded(b));
        assert!(!coord.is_expanded(c));
    }

    #[test]
    fn test_mode_switch_survivor_follows_insertion_order() {
        // Insertion order, not document order: expand C before A.
        let (mut coord, ids) = coordinator_with(Mode::Multiple, 3);
        let (a, c) = (ids[0], ids[2]);

        coord.expand(c);
        coord.expand(a);

        coord.set_mode(Mode::Single);
        assert_eq!(coord.expanded(), &[c]);
    }

    #[test]
    fn test_mode_switch_without_violation_is_silent() {
        let (mut coord, ids) = coordinator_with(Mode::Multiple, 2);
        coord.expand(ids[0]);

        assert!(coord.set_mode(Mode::Single).is_empty());
        assert!(coord.set_mode(Mode::Multiple).is_empty());
        assert_eq!(coord.expanded(), &[ids[0]]);
    }

    #[test]
    fn test_separate_coordinators_do_not_interact() {
        // Nesting isolation: an inner container is its own coordinator.
        let (mut outer, outer_ids) = coordinator_with(Mode::Single, 2);
        let (mut inner, inner_ids) = coordinator_with(Mode::Single, 2);

        outer.expand(outer_ids[0]);
        inner.expand(inner_ids[0]);
        inner.expand(inner_ids[1]);
        inner.collapse(inner_ids[1]);

        assert_eq!(outer.expanded(), &[outer_ids[0]]);
        assert!(outer.is_expanded(outer_ids[0]));
    }

    #[test]
    fn test_new_item_starts_collapsed() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 1);
        coord.expand(ids[0]);

        let late = coord.add_item();
        assert!(!coord.is_expanded(late));
        assert_eq!(coord.expanded(), &[ids[0]]);
    }

    #[test]
    fn test_toggle_round_trip() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 2);
        let a = ids[0];

        assert_eq!(coord.toggle(a), vec![Change::Expanded(a)]);
        assert_eq!(coord.toggle(a), vec![Change::Collapsed(a)]);
        assert!(coord.expanded().is_empty());
    }

    #[test]
    fn test_neighbor_navigation() {
        let (coord, ids) = coordinator_with(Mode::Single, 3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        assert_eq!(coord.neighbor(b, Nav::Prev), Some(a));
        assert_eq!(coord.neighbor(b, Nav::Next), Some(c));
        assert_eq!(coord.neighbor(b, Nav::First), Some(a));
        assert_eq!(coord.neighbor(b, Nav::Last), Some(c));
        assert_eq!(coord.neighbor(a, Nav::Prev), None);
        assert_eq!(coord.neighbor(c, Nav::Next), None);
    }

    #[test]
    fn test_neighbor_does_not_change_expansion() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 3);
        coord.expand(ids[1]);

        coord.neighbor(ids[1], Nav::Next);
        coord.neighbor(ids[1], Nav::First);
        assert_eq!(coord.expanded(), &[ids[1]]);
    }

    #[test]
    fn test_navigation_follows_document_order_after_removal() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 3);
        coord.remove_item(ids[1]);

        assert_eq!(coord.neighbor(ids[0], Nav::Next), Some(ids[2]));
        assert_eq!(coord.neighbor(ids[2], Nav::Prev), Some(ids[0]));
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let (mut coord, ids) = coordinator_with(Mode::Single, 2);
        coord.remove_item(ids[0]);
        let fresh = coord.add_item();

        assert_ne!(fresh, ids[0]);
        assert_ne!(fresh, ids[1]);
        assert!(fresh.index() > ids[1].index());
    }
}
