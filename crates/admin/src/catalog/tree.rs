//! Category tree builder.
//!
//! A pure function of the flat category list: the same input always yields
//! the same forest. Assembly is iterative over an adjacency map, so deep
//! hierarchies cannot overflow the stack.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use storekeep_core::CategoryId;

use crate::models::{Category, CategoryNode};

/// Build the category forest, ordering every sibling group by
/// `(sort_order, id)`.
///
/// Every input category appears exactly once. A category whose parent is
/// not in the input is treated as a root. Categories caught in a parent
/// cycle (which the store never creates) are attached as extra roots after
/// the regular ones, breaking the cycle at the smallest id.
#[must_use]
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let known: BTreeSet<CategoryId> = categories.iter().map(|c| c.id).collect();

    let mut groups: HashMap<Option<CategoryId>, Vec<&Category>> = HashMap::new();
    for category in categories {
        let parent = category.parent_id.filter(|p| known.contains(p));
        groups.entry(parent).or_default().push(category);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|c| (c.sort_order, c.id));
    }

    let mut visited = BTreeSet::new();
    let mut forest = Vec::new();

    let roots = groups.get(&None).map_or(&[][..], Vec::as_slice);
    for root in roots {
        if visited.insert(root.id) {
            forest.push(assemble(root, &groups, &mut visited));
        }
    }

    // Anything not reached from a root sits on a cycle.
    let stranded: BTreeMap<CategoryId, &Category> = categories
        .iter()
        .filter(|c| !visited.contains(&c.id))
        .map(|c| (c.id, c))
        .collect();
    for (id, category) in stranded {
        if visited.insert(id) {
            tracing::warn!(category_id = %id, "Category parent cycle detected, promoting to root");
            forest.push(assemble(category, &groups, &mut visited));
        }
    }

    forest
}

/// One pending node during iterative assembly.
struct Frame<'a> {
    category: &'a Category,
    pending: std::slice::Iter<'a, &'a Category>,
    built: Vec<CategoryNode>,
}

impl<'a> Frame<'a> {
    fn new(
        category: &'a Category,
        groups: &'a HashMap<Option<CategoryId>, Vec<&'a Category>>,
    ) -> Self {
        let children = groups
            .get(&Some(category.id))
            .map_or(&[][..], Vec::as_slice);
        Self {
            category,
            pending: children.iter(),
            built: Vec::with_capacity(children.len()),
        }
    }
}

/// Assemble the subtree under `root` depth-first with an explicit stack.
fn assemble<'a>(
    root: &'a Category,
    groups: &'a HashMap<Option<CategoryId>, Vec<&'a Category>>,
    visited: &mut BTreeSet<CategoryId>,
) -> CategoryNode {
    let mut stack = vec![Frame::new(root, groups)];
    loop {
        let Some(top) = stack.last_mut() else {
            unreachable!("assembly stack drained before the root was emitted");
        };

        if let Some(child) = top.pending.next() {
            if visited.insert(child.id) {
                stack.push(Frame::new(child, groups));
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            unreachable!("assembly stack drained before the root was emitted");
        };
        let node = CategoryNode {
            category: done.category.clone(),
            children: done.built,
        };
        match stack.last_mut() {
            Some(parent) => parent.built.push(node),
            None => return node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: u32, parent: Option<u32>, sort_order: u32) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
            slug: format!("category-{id}"),
            parent_id: parent.map(CategoryId::new),
            sort_order,
            visible: true,
            product_count: 0,
            description: String::new(),
            image_ref: None,
        }
    }

    fn all_ids(forest: &[CategoryNode]) -> Vec<CategoryId> {
        forest.iter().flat_map(CategoryNode::ids).collect()
    }

    #[test]
    fn test_empty_input_builds_empty_forest() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_children_follow_sort_order() {
        let flat = vec![
            category(1, None, 1),
            category(2, Some(1), 2),
            category(3, Some(1), 1),
            category(4, Some(3), 1),
        ];
        let forest = build_tree(&flat);
        assert_eq!(forest.len(), 1);
        let root = forest.first().expect("one root");
        let child_ids: Vec<u32> = root.children.iter().map(|c| c.category.id.as_u32()).collect();
        assert_eq!(child_ids, vec![3, 2]);
        assert_eq!(root.subtree_size(), 4);
    }

    #[test]
    fn test_ties_break_by_id() {
        let flat = vec![category(5, None, 1), category(2, None, 1)];
        let ids: Vec<u32> = build_tree(&flat)
            .iter()
            .map(|n| n.category.id.as_u32())
            .collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_orphans_become_roots() {
        let flat = vec![category(1, None, 1), category(2, Some(99), 1)];
        let forest = build_tree(&flat);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn test_cycles_are_broken_and_every_node_appears_once() {
        let flat = vec![
            category(1, None, 1),
            category(2, Some(3), 1),
            category(3, Some(2), 1),
            category(4, Some(4), 1),
        ];
        let forest = build_tree(&flat);
        let mut ids = all_ids(&forest);
        ids.sort();
        assert_eq!(
            ids,
            vec![
                CategoryId::new(1),
                CategoryId::new(2),
                CategoryId::new(3),
                CategoryId::new(4)
            ]
        );
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 2_000;
        let flat: Vec<Category> = (1..=depth)
            .map(|id| category(id, (id > 1).then_some(id - 1), 1))
            .collect();
        let forest = build_tree(&flat);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.first().map(CategoryNode::subtree_size), Some(depth as usize));
    }

    #[test]
    fn test_build_is_deterministic() {
        let flat = vec![
            category(3, Some(1), 2),
            category(1, None, 1),
            category(2, Some(1), 1),
        ];
        let mut reversed = flat.clone();
        reversed.reverse();
        assert_eq!(build_tree(&flat), build_tree(&reversed));
    }
}
