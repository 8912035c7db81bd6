//! Normalized, insertion-ordered entity collections.
//!
//! A [`Collection`] is the storage every slice keeps its entities in. Ids are
//! unique; order is the order entities arrived in and is only used for
//! display.
//!
//! # Merge policy
//!
//! | Operation | Method |
//! |---|---|
//! | fetch all | [`Collection::replace_all`] |
//! | add | [`Collection::append`] |
//! | remove | [`Collection::remove`] |
//! | update | [`Collection::update`] |

use serde::Serialize;

/// An entity with a stable identifier
pub trait Identified {
    /// Identifier type
    type Id: Clone + Eq + std::fmt::Debug;

    /// The entity's identifier
    fn id(&self) -> &Self::Id;
}

/// An entity that accepts partial updates
///
/// `apply_patch` must only touch the fields present in the patch.
pub trait Patchable {
    /// Partial update type (usually a struct of `Option`s)
    type Patch;

    /// Shallow-merge `patch` into `self`
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Ordered collection with unique ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the whole collection
    ///
    /// Duplicate ids in `items` collapse to one entry: the first position,
    /// the last value.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        for item in items {
            self.append(item);
        }
    }

    /// Append an entity
    ///
    /// Returns `false` if an entity with the same id was already present;
    /// that entry is replaced in place so ids stay unique.
    pub fn append(&mut self, item: T) -> bool {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == item.id()) {
            *existing = item;
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the entity with `id`, if present
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Shallow-merge `patch` into the entity with `id`
    ///
    /// Returns `false` (and drops the patch) if no entity has that id.
    pub fn update(&mut self, id: &T::Id, patch: T::Patch) -> bool
    where
        T: Patchable,
    {
        match self.get_mut(id) {
            Some(item) => {
                item.apply_patch(patch);
                true
            },
            None => false,
        }
    }

    /// Keep only the entities matching `keep`
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    /// Entity by id
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Mutable entity by id
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    /// Whether an entity with `id` exists
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    /// Ids in display order
    pub fn ids(&self) -> impl Iterator<Item = &T::Id> {
        self.items.iter().map(Identified::id)
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }
}

impl<T> Collection<T> {
    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entities in display order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Entities as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Identified> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.replace_all(iter);
        collection
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        title: String,
        done: bool,
    }

    #[derive(Default)]
    struct ItemPatch {
        title: Option<String>,
        done: Option<bool>,
    }

    impl Identified for Item {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    impl Patchable for Item {
        type Patch = ItemPatch;

        fn apply_patch(&mut self, patch: ItemPatch) {
            if let Some(title) = patch.title {
                self.title = title;
            }
            if let Some(done) = patch.done {
                self.done = done;
            }
        }
    }

    fn item(id: u32, title: &str) -> Item {
        Item {
            id,
            title: title.to_string(),
            done: false,
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut items = Collection::new();
        items.append(item(3, "c"));
        items.append(item(1, "a"));
        items.append(item(2, "b"));

        assert_eq!(items.ids().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn append_duplicate_replaces_in_place() {
        let mut items = Collection::new();
        assert!(items.append(item(1, "first")));
        assert!(items.append(item(2, "second")));
        assert!(!items.append(item(1, "renamed")));

        assert_eq!(items.len(), 2);
        assert_eq!(items.as_slice()[0].title, "renamed");
    }

    #[test]
    fn replace_all_drops_previous_entries() {
        let mut items: Collection<Item> = [item(1, "a"), item(2, "b")].into_iter().collect();
        items.replace_all(vec![item(5, "e")]);

        assert_eq!(items.len(), 1);
        assert!(items.contains(&5));
        assert!(!items.contains(&1));
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut items: Collection<Item> = [item(1, "a")].into_iter().collect();
        let before = items.clone();

        assert!(items.remove(&42).is_none());
        assert_eq!(items, before);
    }

    #[test]
    fn update_only_touches_patched_fields() {
        let mut items: Collection<Item> = [item(1, "a")].into_iter().collect();

        assert!(items.update(
            &1,
            ItemPatch {
                done: Some(true),
                ..ItemPatch::default()
            }
        ));

        let updated = items.get(&1).cloned();
        assert_eq!(
            updated,
            Some(Item {
                id: 1,
                title: "a".to_string(),
                done: true,
            })
        );
    }

    #[test]
    fn update_unknown_id_returns_false() {
        let mut items: Collection<Item> = Collection::new();
        assert!(!items.update(&7, ItemPatch::default()));
    }
}
