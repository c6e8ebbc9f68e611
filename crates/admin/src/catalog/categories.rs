//! Category hierarchy operations.

use tracing::instrument;

use storekeep_core::CategoryId;

use super::{CatalogState, CatalogStore, next_id, tree::build_tree};
use crate::error::CatalogError;
use crate::models::{Category, CategoryInput, CategoryNode};

impl CatalogState {
    /// IDs of the sibling group under `parent`, in rank order.
    fn sibling_ids(&self, parent: Option<CategoryId>) -> Vec<CategoryId> {
        let mut group: Vec<&Category> = self
            .categories
            .values()
            .filter(|c| c.parent_id == parent)
            .collect();
        group.sort_by_key(|c| (c.sort_order, c.id));
        group.into_iter().map(|c| c.id).collect()
    }

    fn child_count(&self, id: CategoryId) -> usize {
        self.categories
            .values()
            .filter(|c| c.parent_id == Some(id))
            .count()
    }

    /// Whether `ancestor` appears on the parent chain starting at `node`
    /// (inclusive).
    fn has_ancestor(&self, node: CategoryId, ancestor: CategoryId) -> bool {
        let mut current = Some(node);
        // The chain can be no longer than the collection.
        for _ in 0..=self.categories.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.categories.get(&id).and_then(|c| c.parent_id),
                None => return false,
            }
        }
        false
    }

    /// Assign ranks 1..N in the given order.
    fn rank(&mut self, ordered: &[CategoryId]) {
        for (rank, id) in (1u32..).zip(ordered) {
            if let Some(category) = self.categories.get_mut(id) {
                category.sort_order = rank;
            }
        }
    }

    fn ensure_parent_exists(&self, parent: Option<CategoryId>) -> Result<(), CatalogError> {
        match parent {
            Some(p) if !self.categories.contains_key(&p) => Err(CatalogError::UnknownParent(p)),
            _ => Ok(()),
        }
    }
}

impl CatalogStore {
    fn normalize_image_ref(&self, image_ref: Option<&str>) -> Option<String> {
        image_ref
            .map(|r| self.media.normalize(r))
            .filter(|r| !r.is_empty())
    }

    /// Create a category ranked last among its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownParent`] if `parent_id` names a
    /// category that does not exist.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_category(&self, input: CategoryInput) -> Result<Category, CatalogError> {
        let image_ref = self.normalize_image_ref(input.image_ref.as_deref());
        let mut state = self.lock();
        state.ensure_parent_exists(input.parent_id)?;

        let sort_order = state
            .categories
            .values()
            .filter(|c| c.parent_id == input.parent_id)
            .map(|c| c.sort_order)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        let id = CategoryId::new(next_id(&mut state.last_category_id));
        let category = Category {
            id,
            slug: input.resolved_slug(),
            name: input.name,
            parent_id: input.parent_id,
            sort_order,
            visible: input.visible,
            product_count: input.product_count,
            description: input.description,
            image_ref,
        };

        let previous = state.categories.insert(id, category.clone());
        assert!(previous.is_none(), "duplicate category id {id}");

        tracing::info!(category_id = %id, sort_order, "Category created");
        Ok(category)
    }

    /// Look up one category.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.lock().categories.get(&id).cloned()
    }

    /// Every category, grouped by parent (roots first) and ranked within
    /// each group.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut all: Vec<Category> = self.lock().categories.values().cloned().collect();
        all.sort_by_key(|c| (c.parent_id, c.sort_order, c.id));
        all
    }

    /// Replace every mutable field of a category except its rank.
    ///
    /// Moving a category to a new parent closes the gap it leaves in its old
    /// sibling group. The moved category keeps its old `sort_order`; callers
    /// follow up with [`reorder_categories`](Self::reorder_categories).
    /// Returns `Ok(None)` if `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownParent`] if the new parent does not
    /// exist, or [`CatalogError::CategoryCycle`] if it is the category itself
    /// or one of its descendants.
    #[instrument(skip(self, input), fields(category_id = %id))]
    pub fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Option<Category>, CatalogError> {
        let image_ref = self.normalize_image_ref(input.image_ref.as_deref());
        let mut state = self.lock();
        let Some(current_parent) = state.categories.get(&id).map(|c| c.parent_id) else {
            return Ok(None);
        };

        if input.parent_id != current_parent {
            if let Some(parent) = input.parent_id {
                state.ensure_parent_exists(Some(parent))?;
                if state.has_ancestor(parent, id) {
                    return Err(CatalogError::CategoryCycle { id, parent });
                }
            }
        }

        let slug = input.resolved_slug();
        let Some(category) = state.categories.get_mut(&id) else {
            return Ok(None);
        };
        category.name = input.name;
        category.slug = slug;
        category.parent_id = input.parent_id;
        category.visible = input.visible;
        category.product_count = input.product_count;
        category.description = input.description;
        category.image_ref = image_ref;
        let updated = category.clone();

        if updated.parent_id != current_parent {
            let left_behind = state.sibling_ids(current_parent);
            state.rank(&left_behind);
            tracing::debug!(old_group_size = left_behind.len(), "Former sibling group re-ranked");
        }

        tracing::info!("Category updated");
        Ok(Some(updated))
    }

    /// Delete a leaf category and close the gap in its sibling group.
    ///
    /// Returns `Ok(None)` if `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryHasChildren`] if any category still
    /// names this one as its parent.
    #[instrument(skip(self), fields(category_id = %id))]
    pub fn delete_category(&self, id: CategoryId) -> Result<Option<Category>, CatalogError> {
        let mut state = self.lock();
        if !state.categories.contains_key(&id) {
            return Ok(None);
        }

        let children = state.child_count(id);
        if children > 0 {
            return Err(CatalogError::CategoryHasChildren { id, children });
        }

        let removed = state.categories.remove(&id);
        if let Some(removed) = &removed {
            let siblings = state.sibling_ids(removed.parent_id);
            state.rank(&siblings);
            tracing::info!(remaining_siblings = siblings.len(), "Category deleted");
        }
        Ok(removed)
    }

    /// Rank a sibling group in the given order.
    ///
    /// Listed siblings receive `sort_order` 1, 2, ... in list order. Siblings
    /// missing from the list follow, keeping their previous relative order,
    /// so the group stays densely ranked. IDs outside the group are ignored.
    ///
    /// Returns the group in its new order, or `None` if `parent_id` names an
    /// unknown category.
    #[instrument(skip(self, ordered_ids), fields(parent_id = ?parent_id, listed = ordered_ids.len()))]
    pub fn reorder_categories(
        &self,
        parent_id: Option<CategoryId>,
        ordered_ids: &[CategoryId],
    ) -> Option<Vec<Category>> {
        let mut state = self.lock();
        if state.ensure_parent_exists(parent_id).is_err() {
            return None;
        }

        let group = state.sibling_ids(parent_id);
        let mut ranked: Vec<CategoryId> = Vec::with_capacity(group.len());
        for id in ordered_ids {
            if !group.contains(id) {
                tracing::warn!(category_id = %id, "Ignoring category outside the sibling group");
            } else if !ranked.contains(id) {
                ranked.push(*id);
            }
        }
        let omitted: Vec<CategoryId> = group
            .iter()
            .filter(|id| !ranked.contains(id))
            .copied()
            .collect();
        ranked.extend(omitted);

        state.rank(&ranked);
        tracing::debug!(group_size = ranked.len(), "Sibling group reordered");

        Some(
            ranked
                .iter()
                .filter_map(|id| state.categories.get(id).cloned())
                .collect(),
        )
    }

    /// The category forest ordered by rank.
    #[must_use]
    pub fn category_tree(&self) -> Vec<CategoryNode> {
        let snapshot = self.categories();
        build_tree(&snapshot)
    }
}
