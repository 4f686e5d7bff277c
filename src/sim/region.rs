//! Fixed-depth region index
//!
//! A square-ish board area is split into four quadrants, each of those into
//! four more, down to a depth chosen at construction. Items live only in the
//! leaves. Collision checks then scan a single leaf instead of every peg.
//!
//! The tree is stored as a flat arena. Node 0 is the root and the four
//! children of a node always occupy consecutive slots, ordered top-left,
//! top-right, bottom-left, bottom-right.
//!
//! Bounds are inclusive on every edge. A point sitting exactly on a shared
//! edge therefore belongs to more than one leaf, and `place` stores the item in
//! all of them. Redundant checks near a seam are harmless; an item that lands
//! in no leaf would never be hit.

use glam::Vec2;

use crate::renderer::{Color, Surface};

/// Index of a region in its tree
pub type RegionId = usize;

/// The root is always the first node
pub const ROOT: RegionId = 0;

/// One node of the region tree
#[derive(Debug, Clone)]
pub struct Region<T> {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height
    pub extent: Vec2,
    /// Remaining subdivision levels below this node
    pub depth: u32,
    /// First of the four consecutive child slots
    first_child: Option<RegionId>,
    /// Items stored here (leaves only)
    contents: Vec<T>,
}

impl<T> Region<T> {
    fn new(origin: Vec2, extent: Vec2, depth: u32) -> Self {
        Self {
            origin,
            extent,
            depth,
            first_child: None,
            contents: Vec::new(),
        }
    }

    /// Does a point fall within this region? Inclusive on all four edges.
    #[inline]
    pub fn bounds(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.extent.x
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.extent.y
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Child ids in construction order, or `None` for a leaf
    pub fn subregions(&self) -> Option<[RegionId; 4]> {
        self.first_child.map(|c| [c, c + 1, c + 2, c + 3])
    }

    pub fn contents(&self) -> &[T] {
        &self.contents
    }
}

/// Arena-backed region tree
#[derive(Debug, Clone)]
pub struct RegionTree<T> {
    nodes: Vec<Region<T>>,
}

impl<T: Copy> RegionTree<T> {
    /// Build the full tree eagerly. `depth == 0` gives a single leaf.
    pub fn new(origin: Vec2, extent: Vec2, depth: u32) -> Self {
        let mut nodes = vec![Region::new(origin, extent, depth)];

        // Breadth-first, so siblings are pushed together
        let mut i = 0;
        while i < nodes.len() {
            let parent = &nodes[i];
            if parent.depth > 0 {
                let (pos, half, depth) = (parent.origin, parent.extent / 2.0, parent.depth - 1);
                let first = nodes.len();
                nodes[i].first_child = Some(first);
                nodes.push(Region::new(pos, half, depth));
                nodes.push(Region::new(pos + Vec2::new(half.x, 0.0), half, depth));
                nodes.push(Region::new(pos + Vec2::new(0.0, half.y), half, depth));
                nodes.push(Region::new(pos + half, half, depth));
            }
            i += 1;
        }

        log::debug!(
            "Region tree built: depth {}, {} nodes over {:?}",
            depth,
            nodes.len(),
            extent
        );

        Self { nodes }
    }

    pub fn root(&self) -> &Region<T> {
        &self.nodes[ROOT]
    }

    /// `None` if `id` did not come from this tree
    pub fn region(&self, id: RegionId) -> Option<&Region<T>> {
        self.nodes.get(id)
    }

    /// Total node count
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All leaves with their ids
    pub fn leaves(&self) -> impl Iterator<Item = (RegionId, &Region<T>)> {
        self.nodes.iter().enumerate().filter(|(_, r)| r.is_leaf())
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Store `item` in every leaf whose bounds contain `point`.
    /// Returns how many leaves received it (0 when outside the root).
    pub fn place(&mut self, point: Vec2, item: T) -> usize {
        self.place_in(ROOT, point, item)
    }

    fn place_in(&mut self, id: RegionId, point: Vec2, item: T) -> usize {
        if !self.nodes[id].bounds(point) {
            return 0;
        }

        match self.nodes[id].subregions() {
            Some(children) => children
                .into_iter()
                .map(|child| self.place_in(child, point, item))
                .sum(),
            None => {
                self.nodes[id].contents.push(item);
                1
            }
        }
    }

    /// The leaf containing `point`, descending into the first matching child
    /// at each level. `None` when the point is outside the root.
    pub fn find(&self, point: Vec2) -> Option<RegionId> {
        self.find_from(ROOT, point)
    }

    fn find_from(&self, id: RegionId, point: Vec2) -> Option<RegionId> {
        let region = &self.nodes[id];
        if !region.bounds(point) {
            return None;
        }

        match region.subregions() {
            Some(children) => children
                .into_iter()
                .find_map(|child| self.find_from(child, point)),
            None => Some(id),
        }
    }

    /// First item in `leaf` (insertion order) for which `hit` is true.
    /// No closest-match selection. `None` also for an unknown id.
    pub fn hits_contents<F>(&self, leaf: RegionId, mut hit: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.nodes.get(leaf)?.contents.iter().copied().find(|item| hit(item))
    }

    /// Stroke every region outline
    pub fn draw_debug(&self, surface: &mut dyn Surface, color: Color) {
        for region in &self.nodes {
            surface.stroke_rect(region.origin, region.extent, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn board_tree(depth: u32) -> RegionTree<u32> {
        RegionTree::new(Vec2::ZERO, Vec2::new(512.0, 512.0), depth)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() <= 1e-3 * (1.0 + a.abs().max_element())
    }

    #[test]
    fn test_node_counts() {
        assert_eq!(board_tree(0).len(), 1);
        assert_eq!(board_tree(1).len(), 5);
        assert_eq!(board_tree(3).len(), 85);
        assert_eq!(board_tree(3).leaf_count(), 64);
        assert!(board_tree(0).root().is_leaf());
    }

    #[test]
    fn test_children_order() {
        let tree = board_tree(1);
        let [tl, tr, bl, br] = tree.root().subregions().unwrap();
        assert_eq!(tree.region(tl).unwrap().origin, Vec2::new(0.0, 0.0));
        assert_eq!(tree.region(tr).unwrap().origin, Vec2::new(256.0, 0.0));
        assert_eq!(tree.region(bl).unwrap().origin, Vec2::new(0.0, 256.0));
        assert_eq!(tree.region(br).unwrap().origin, Vec2::new(256.0, 256.0));
        for id in [tl, tr, bl, br] {
            assert_eq!(tree.region(id).unwrap().extent, Vec2::new(256.0, 256.0));
            assert_eq!(tree.region(id).unwrap().depth, 0);
        }
    }

    #[test]
    fn test_bounds_inclusive() {
        let tree = board_tree(0);
        let root = tree.root();
        assert!(root.bounds(Vec2::ZERO));
        assert!(root.bounds(Vec2::new(512.0, 512.0)));
        assert!(root.bounds(Vec2::new(0.0, 512.0)));
        assert!(!root.bounds(Vec2::new(-0.01, 10.0)));
        assert!(!root.bounds(Vec2::new(10.0, 512.01)));
        assert!(!root.bounds(Vec2::new(f32::NAN, 10.0)));
    }

    #[test]
    fn test_find_outside_is_none() {
        let tree = board_tree(3);
        assert_eq!(tree.find(Vec2::new(-1.0, 10.0)), None);
        assert_eq!(tree.find(Vec2::new(10.0, 600.0)), None);
    }

    #[test]
    fn test_find_on_seam_takes_first_child() {
        let tree = board_tree(1);
        let [tl, ..] = tree.root().subregions().unwrap();
        // Center touches all four quadrants; top-left is checked first
        assert_eq!(tree.find(Vec2::new(256.0, 256.0)), Some(tl));
    }

    #[test]
    fn test_place_on_seams() {
        let mut tree = board_tree(1);
        // Interior of the top-right quadrant
        assert_eq!(tree.place(Vec2::new(300.0, 100.0), 1), 1);
        // On the vertical seam: top-left and top-right
        assert_eq!(tree.place(Vec2::new(256.0, 100.0), 2), 2);
        // Dead center: all four
        assert_eq!(tree.place(Vec2::new(256.0, 256.0), 3), 4);
        // Outside
        assert_eq!(tree.place(Vec2::new(600.0, 100.0), 4), 0);

        let [tl, tr, bl, br] = tree.root().subregions().unwrap();
        assert_eq!(tree.region(tl).unwrap().contents(), &[2, 3]);
        assert_eq!(tree.region(tr).unwrap().contents(), &[1, 2, 3]);
        assert_eq!(tree.region(bl).unwrap().contents(), &[3]);
        assert_eq!(tree.region(br).unwrap().contents(), &[3]);
        assert!(tree.root().contents().is_empty());
    }

    #[test]
    fn test_unknown_id_is_none() {
        let mut tree = board_tree(1);
        tree.place(Vec2::new(5.0, 5.0), 1);
        assert!(tree.region(tree.len()).is_none());
        assert_eq!(tree.hits_contents(tree.len() + 3, |_| true), None);
        assert!(tree.region(ROOT).is_some());
    }

    #[test]
    fn test_hits_contents_first_match() {
        let mut tree = board_tree(0);
        for item in [10, 20, 30] {
            tree.place(Vec2::new(5.0, 5.0), item);
        }
        assert_eq!(tree.hits_contents(ROOT, |&i| i >= 20), Some(20));
        assert_eq!(tree.hits_contents(ROOT, |&i| i > 100), None);
    }

    proptest! {
        #[test]
        fn prop_children_tile_parent(
            ox in -1000.0f32..1000.0,
            oy in -1000.0f32..1000.0,
            w in 1.0f32..2000.0,
            h in 1.0f32..2000.0,
            depth in 0u32..5,
        ) {
            let tree: RegionTree<u32> = RegionTree::new(Vec2::new(ox, oy), Vec2::new(w, h), depth);
            for id in 0..tree.len() {
                let parent = tree.region(id).unwrap();
                prop_assert_eq!(parent.is_leaf(), parent.depth == 0);
                let Some([tl, tr, bl, br]) = parent.subregions() else { continue };

                let half = parent.extent / 2.0;
                for child in [tl, tr, bl, br] {
                    prop_assert_eq!(tree.region(child).unwrap().extent, half);
                    prop_assert_eq!(tree.region(child).unwrap().depth, parent.depth - 1);
                }
                prop_assert_eq!(tree.region(tl).unwrap().origin, parent.origin);
                prop_assert!(approx(tree.region(tr).unwrap().origin, parent.origin + Vec2::new(half.x, 0.0)));
                prop_assert!(approx(tree.region(bl).unwrap().origin, parent.origin + Vec2::new(0.0, half.y)));
                prop_assert!(approx(tree.region(br).unwrap().origin, parent.origin + half));
                // Far corner of the last child is the far corner of the parent
                let br = tree.region(br).unwrap();
                prop_assert!(approx(br.origin + br.extent, parent.origin + parent.extent));
            }
        }

        #[test]
        fn prop_find_inside_returns_containing_leaf(
            fx in 0.001f32..0.999,
            fy in 0.001f32..0.999,
            depth in 0u32..5,
        ) {
            let tree = board_tree(depth);
            let point = Vec2::new(512.0 * fx, 512.0 * fy);
            let leaf = tree.find(point);
            prop_assert!(leaf.is_some());
            let leaf = tree.region(leaf.unwrap()).unwrap();
            prop_assert!(leaf.is_leaf());
            prop_assert!(leaf.bounds(point));
        }

        #[test]
        fn prop_find_outside_is_none(
            x in -500.0f32..1000.0,
            y in 512.5f32..1000.0,
        ) {
            let tree = board_tree(3);
            prop_assert_eq!(tree.find(Vec2::new(x, y)), None);
            prop_assert_eq!(tree.find(Vec2::new(y, x)), None);
        }

        #[test]
        fn prop_interior_point_placed_in_one_leaf(
            leaf_index in 0usize..64,
            fx in 0.01f32..0.99,
            fy in 0.01f32..0.99,
        ) {
            let mut tree = board_tree(3);
            let (id, leaf) = tree.leaves().nth(leaf_index).unwrap();
            let point = leaf.origin + leaf.extent * Vec2::new(fx, fy);

            prop_assert_eq!(tree.place(point, 7u32), 1);
            prop_assert_eq!(tree.region(id).unwrap().contents(), &[7]);
            prop_assert_eq!(tree.find(point), Some(id));
            for (other, region) in tree.leaves() {
                if other != id {
                    prop_assert!(region.contents().is_empty());
                }
            }
        }
    }
}
