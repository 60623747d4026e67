//! quadpix-region - Adaptive region decomposition for quadpix
//!
//! This crate splits a grayscale raster into rectangular regions of
//! near-uniform intensity and keeps them in a binary search tree:
//!
//! - **Regions** - Rectangles with a split-axis flag, keyed by origin
//! - **Region tree** - Insert, search, locate, delete and traversal
//! - **Statistics** - Mean and intensity range over a region
//! - **Partitioning** - Alternating-axis binary splitting until every
//!   region is homogeneous
//! - **Rendering** - Mean-filled reconstruction and region outlines
//!
//! # Examples
//!
//! ## Partitioning a raster
//!
//! ```
//! use quadpix_core::Pix;
//! use quadpix_region::{PartitionOptions, partition_pix};
//!
//! // Left half black, right half white
//! let data = (0..16).map(|i| if i % 4 < 2 { 0 } else { 255 }).collect();
//! let pix = Pix::from_bytes(4, 4, data).unwrap();
//!
//! let tree = partition_pix(&pix, &PartitionOptions::default()).unwrap();
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.locate(3, 3).map(|r| r.tx()), Some(2));
//! ```
//!
//! ## Lossy reconstruction
//!
//! ```
//! use quadpix_core::Pix;
//! use quadpix_region::{PartitionOptions, compress};
//!
//! let pix = Pix::from_bytes(4, 1, vec![10, 12, 200, 204]).unwrap();
//! let (out, _tree) = compress(&pix, &PartitionOptions::new().with_threshold(5)).unwrap();
//! assert_eq!(out.data(), &[11, 11, 202, 202]);
//! ```
//!
//! ## Building a tree by hand
//!
//! ```
//! use quadpix_region::{RegionTree, TraversalOrder};
//!
//! let mut tree = RegionTree::new(5);
//! tree.insert(tree.region(0, 0, 2, 4, false)).unwrap();
//! tree.insert(tree.region(2, 0, 3, 4, false)).unwrap();
//!
//! let keys: Vec<u64> = tree
//!     .traverse(TraversalOrder::InOrder)
//!     .map(|(_, r)| r.key())
//!     .collect();
//! assert_eq!(keys, [0, 2]);
//! ```

pub mod error;
pub mod partition;
pub mod region;
pub mod render;
pub mod stats;
pub mod tree;

pub use error::{RegionError, RegionResult};
pub use partition::{PartitionOptions, partition, partition_pix, refine_once, split_region};
pub use region::{Region, SplitAxis, linear_key};
pub use render::{compress, draw_borders, draw_borders_in_place, paint_means, paint_means_in_place};
pub use stats::{RegionStats, intensity_range, is_homogeneous, mean_intensity, region_stats};
pub use tree::{RegionTree, Traversal, TraversalLine, TraversalOrder};
