//! RegionTree - binary search tree of regions keyed by origin
//!
//! Each node owns one [`Region`] and up to two children. Keys are the
//! row-major offset of the region origin, `tx + ty * raster_width`, so a
//! tree can hold at most one region per origin pixel.
//!
//! The tree is a plain BST: there is no rebalancing, and its shape is
//! decided entirely by insertion order. Deletion of a node with two
//! children copies the in-order successor's payload into the node and
//! then deletes the successor's original node, so the deleted node's
//! position in the tree survives with new contents.
//!
//! Insert, search, delete, traversal and teardown are iterative; a
//! degenerate (list-shaped) tree costs time but not stack.

use crate::error::{RegionError, RegionResult};
use crate::region::{Region, linear_key};
use quadpix_core::{Boxa, Pix};
use std::cmp::Ordering;
use std::fmt;
use std::io::Write;

#[derive(Debug)]
struct Node {
    region: Region,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(region: Region) -> Self {
        Self {
            region,
            left: None,
            right: None,
        }
    }
}

/// Order in which [`RegionTree::traverse`] visits nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree (ascending keys)
    InOrder,
    /// Node, left subtree, right subtree
    PreOrder,
    /// Left subtree, right subtree, node
    PostOrder,
}

/// Binary search tree of regions sharing one raster width
#[derive(Debug)]
pub struct RegionTree {
    raster_width: u32,
    root: Option<Box<Node>>,
    len: usize,
}

impl RegionTree {
    /// Create an empty tree for a raster `raster_width` pixels wide.
    pub fn new(raster_width: u32) -> Self {
        Self {
            raster_width,
            root: None,
            len: 0,
        }
    }

    /// Create a tree holding one region that spans the whole raster.
    ///
    /// `wsplit` selects the axis of the first split.
    pub fn covering(pix: &Pix, wsplit: bool) -> Self {
        let mut tree = Self::new(pix.width());
        let region = tree.region(0, 0, pix.width(), pix.height(), wsplit);
        tree.root = Some(Box::new(Node::new(region)));
        tree.len = 1;
        tree
    }

    /// Build a tree from regions, inserting them median-first in key order.
    ///
    /// Keys are recomputed for `raster_width`. Inserting the median of
    /// every key range before the rest of the range gives a tree of
    /// minimal height without any rebalancing. Duplicate origins are
    /// reported and skipped.
    pub fn from_regions(raster_width: u32, regions: impl IntoIterator<Item = Region>) -> Self {
        let mut sorted: Vec<Region> = regions
            .into_iter()
            .map(|r| r.rekeyed(raster_width))
            .collect();
        sorted.sort_by_key(Region::key);

        let mut tree = Self::new(raster_width);
        let mut ranges = vec![(0usize, sorted.len())];
        while let Some((lo, hi)) = ranges.pop() {
            if lo >= hi {
                continue;
            }
            let mid = lo + (hi - lo) / 2;
            // Duplicates are logged by insert; nothing else to do here
            let _ = tree.insert(sorted[mid]);
            ranges.push((mid + 1, hi));
            ranges.push((lo, mid));
        }
        tree
    }

    /// Build a tree from regions, inserting them in the order given.
    ///
    /// The shape is whatever that order produces; sorted input gives a
    /// list-shaped tree. Keys are recomputed for `raster_width` and
    /// duplicate origins are reported and skipped, as in
    /// [`RegionTree::from_regions`].
    pub fn from_regions_in_order(
        raster_width: u32,
        regions: impl IntoIterator<Item = Region>,
    ) -> Self {
        let mut tree = Self::new(raster_width);
        for region in regions {
            // Duplicates are logged by insert
            let _ = tree.insert(region);
        }
        tree
    }

    /// Width of the raster every key in this tree is computed from
    #[inline]
    pub fn raster_width(&self) -> u32 {
        self.raster_width
    }

    /// Number of regions in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no regions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Create a region keyed for this tree's raster width.
    pub fn region(&self, tx: u32, ty: u32, w: u32, h: u32, wsplit: bool) -> Region {
        Region::new(tx, ty, w, h, wsplit, self.raster_width)
    }

    /// Number of levels in the tree (0 when empty)
    pub fn height(&self) -> usize {
        self.traverse(TraversalOrder::PreOrder)
            .map(|(depth, _)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Insert a region.
    ///
    /// The key is recomputed for this tree's raster width, so a region
    /// built for another raster is still found at its origin. Keys are
    /// compared with strict `<` / `>`; an equal key is a duplicate
    /// origin. A duplicate is logged and rejected with
    /// [`RegionError::DuplicateKey`], leaving the tree unchanged.
    pub fn insert(&mut self, region: Region) -> RegionResult<()> {
        let region = region.rekeyed(self.raster_width);
        let key = region.key();
        let mut cur = &mut self.root;
        while let Some(node) = cur {
            match key.cmp(&node.region.key()) {
                Ordering::Less => cur = &mut node.left,
                Ordering::Greater => cur = &mut node.right,
                Ordering::Equal => {
                    tracing::warn!(
                        tx = region.tx(),
                        ty = region.ty(),
                        raster_width = self.raster_width,
                        "duplicate region ignored"
                    );
                    return Err(RegionError::DuplicateKey {
                        tx: region.tx(),
                        ty: region.ty(),
                        key,
                    });
                }
            }
        }
        *cur = Some(Box::new(Node::new(region)));
        self.len += 1;
        Ok(())
    }

    /// Find the region whose origin is exactly `(x, y)`.
    pub fn search(&self, x: u32, y: u32) -> Option<&Region> {
        let key = linear_key(x, y, self.raster_width);
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(&node.region.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.region),
            };
        }
        None
    }

    /// Find the region whose bounding box contains pixel `(x, y)`.
    ///
    /// A region's origin key never exceeds the key of any pixel inside
    /// it, so subtrees whose keys are all larger are skipped.
    pub fn locate(&self, x: u32, y: u32) -> Option<&Region> {
        let key = linear_key(x, y, self.raster_width);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
            if node.region.key() <= key {
                if node.region.contains(x, y) {
                    return Some(&node.region);
                }
                if let Some(right) = node.right.as_deref() {
                    stack.push(right);
                }
            }
        }
        None
    }

    /// Delete the region whose origin is `(x, y)`.
    ///
    /// Returns the removed region, or `None` if no region starts there.
    pub fn delete(&mut self, x: u32, y: u32) -> Option<Region> {
        let key = linear_key(x, y, self.raster_width);
        let removed = remove_key(&mut self.root, key)?;
        self.len -= 1;
        Some(removed)
    }

    /// Remove every region, freeing nodes children-first.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Lazily visit every node in the given order.
    ///
    /// Yields `(depth, region)` pairs with the root at depth 0. Call
    /// again (or clone the iterator) to restart.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal {
            order,
            stack: self
                .root
                .as_deref()
                .map(|node| Frame {
                    node,
                    depth: 0,
                    expanded: false,
                })
                .into_iter()
                .collect(),
        }
    }

    /// Iterate over the regions in ascending key order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.traverse(TraversalOrder::InOrder).map(|(_, r)| r)
    }

    /// Bounding boxes of all regions, in ascending key order.
    pub fn to_boxa(&self) -> Boxa {
        self.regions().map(Region::bounding_box).collect()
    }

    /// Write one diagnostic line per node in the given order.
    ///
    /// Each line is
    /// `Depth=<d>, key=<k>, tx:ty (<tx>:<ty>), w=<w>, h=<h>, wsplit=<0|1>`.
    pub fn write_traversal(&self, writer: &mut impl Write, order: TraversalOrder) -> RegionResult<()> {
        for (depth, region) in self.traverse(order) {
            writeln!(writer, "{}", TraversalLine { depth, region })?;
        }
        Ok(())
    }

    /// Remove and return every region, leaving the tree empty.
    ///
    /// Regions come out in no particular order.
    pub fn take_regions(&mut self) -> Vec<Region> {
        let mut regions = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
            regions.push(node.region);
        }
        self.len = 0;
        regions
    }
}

impl Drop for RegionTree {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Remove the node with `key` from the subtree at `slot`.
fn remove_key(slot: &mut Option<Box<Node>>, key: u64) -> Option<Region> {
    let mut cur = slot;
    loop {
        let ord = key.cmp(&cur.as_deref()?.region.key());
        if ord == Ordering::Equal {
            break;
        }
        let node = cur.as_mut()?;
        cur = if ord == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }

    let node = cur.as_mut()?;
    if node.left.is_some() && node.right.is_some() {
        let mut successor = node.right.as_deref()?;
        while let Some(left) = successor.left.as_deref() {
            successor = left;
        }
        let successor = successor.region;
        let removed = std::mem::replace(&mut node.region, successor);
        remove_key(&mut node.right, successor.key());
        return Some(removed);
    }

    let mut taken = cur.take()?;
    *cur = taken.left.take().or_else(|| taken.right.take());
    Some(taken.region)
}

#[derive(Debug, Clone)]
struct Frame<'a> {
    node: &'a Node,
    depth: usize,
    expanded: bool,
}

/// Iterator over `(depth, region)` pairs of a [`RegionTree`]
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    order: TraversalOrder,
    stack: Vec<Frame<'a>>,
}

impl<'a> Traversal<'a> {
    fn push_child(&mut self, child: Option<&'a Node>, depth: usize) {
        if let Some(node) = child {
            self.stack.push(Frame {
                node,
                depth,
                expanded: false,
            });
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (usize, &'a Region);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let Frame { node, depth, .. } = frame;
            if frame.expanded {
                return Some((depth, &node.region));
            }
            let left = node.left.as_deref();
            let right = node.right.as_deref();
            // Frames are pushed in reverse of the order they must come out
            match self.order {
                TraversalOrder::PreOrder => {
                    self.push_child(right, depth + 1);
                    self.push_child(left, depth + 1);
                    return Some((depth, &node.region));
                }
                TraversalOrder::InOrder => {
                    self.push_child(right, depth + 1);
                    self.stack.push(Frame {
                        expanded: true,
                        ..frame
                    });
                    self.push_child(left, depth + 1);
                }
                TraversalOrder::PostOrder => {
                    self.stack.push(Frame {
                        expanded: true,
                        ..frame
                    });
                    self.push_child(right, depth + 1);
                    self.push_child(left, depth + 1);
                }
            }
        }
        None
    }
}

/// One line of traversal diagnostics
#[derive(Debug, Clone, Copy)]
pub struct TraversalLine<'a> {
    /// Depth below the traversal root
    pub depth: usize,
    /// Region stored at the node
    pub region: &'a Region,
}

impl fmt::Display for TraversalLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Depth={}, {}", self.depth, self.region)
    }
}
