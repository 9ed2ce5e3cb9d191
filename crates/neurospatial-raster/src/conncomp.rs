//! Connected component relabeling
//!
//! Two-pass labeling of a binary mask using a union-find forest. Output ids
//! are contiguous from 1 and ordered by the raster-scan position of each
//! component's first pixel, so the result is deterministic.

use crate::error::RasterResult;
use neurospatial_core::{BinaryMask, LabelMap};

/// Connectivity type for component and adjacency analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// Disjoint-set forest over provisional labels
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn new() -> Self {
        // index 0 is background and never joined
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Label all connected components of a binary mask
///
/// # Arguments
///
/// * `mask` - Input mask
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// A label map with the mask's shape and calibration, holding ids `1..=K`
/// for the `K` components and 0 elsewhere.
pub fn connected_component_relabel(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RasterResult<LabelMap> {
    let (width, height) = mask.dimensions();
    let w = width as usize;
    let src = mask.data();

    let mut provisional = vec![0u32; src.len()];
    let mut forest = DisjointSet::new();

    for y in 0..height as usize {
        for x in 0..w {
            let idx = y * w + x;
            if src[idx] == 0 {
                continue;
            }

            let mut adj = [0u32; 4];
            let mut num_adj = 0;
            let mut push = |label: u32| {
                if label != 0 {
                    adj[num_adj] = label;
                    num_adj += 1;
                }
            };

            if x > 0 {
                push(provisional[idx - 1]);
            }
            if y > 0 {
                push(provisional[idx - w]);
                if connectivity == ConnectivityType::EightWay {
                    if x > 0 {
                        push(provisional[idx - w - 1]);
                    }
                    if x + 1 < w {
                        push(provisional[idx - w + 1]);
                    }
                }
            }

            if num_adj == 0 {
                provisional[idx] = forest.make_set();
            } else {
                let min_label = adj[..num_adj].iter().copied().min().unwrap_or(0);
                provisional[idx] = min_label;
                for &label in &adj[..num_adj] {
                    forest.union(min_label, label);
                }
            }
        }
    }

    // Second pass: resolve roots and renumber in scan order
    let mut final_ids = vec![0u32; forest.parent.len()];
    let mut next_id = 1u32;
    let mut out = mask.as_label_map().create_template().to_mut();
    let dst = out.data_mut();

    for (idx, &label) in provisional.iter().enumerate() {
        if label == 0 {
            continue;
        }
        let root = forest.find(label) as usize;
        if final_ids[root] == 0 {
            final_ids[root] = next_id;
            next_id += 1;
        }
        dst[idx] = final_ids[root];
    }

    tracing::trace!(components = next_id - 1, ?connectivity, "relabeled mask");
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurospatial_test::fixtures::mask_from_rows;

    #[test]
    fn test_count_components() {
        let mask = mask_from_rows(&[
            &[1, 1, 0, 0, 0],
            &[0, 0, 0, 1, 1],
            &[0, 0, 0, 0, 0],
            &[1, 0, 0, 0, 1],
        ]);
        let labeled = connected_component_relabel(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(labeled.max_label(), 4);
        assert_eq!(labeled.row_data(0), &[1, 1, 0, 0, 0]);
        assert_eq!(labeled.row_data(1), &[0, 0, 0, 2, 2]);
        assert_eq!(labeled.row_data(3), &[3, 0, 0, 0, 4]);
    }

    #[test]
    fn test_diagonal_connectivity() {
        let mask = mask_from_rows(&[&[1, 0, 1], &[0, 1, 0]]);
        let four = connected_component_relabel(&mask, ConnectivityType::FourWay).unwrap();
        let eight = connected_component_relabel(&mask, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.max_label(), 3);
        assert_eq!(eight.max_label(), 1);
    }

    #[test]
    fn test_u_shape_merges_into_first_id() {
        // Both arms start as separate provisional labels and merge at the bottom
        let mask = mask_from_rows(&[&[1, 0, 1], &[1, 0, 1], &[1, 1, 1], &[0, 0, 0]]);
        let labeled = connected_component_relabel(&mask, ConnectivityType::FourWay).unwrap();
        assert_eq!(labeled.max_label(), 1);
        assert_eq!(labeled.foreground_count(), 7);
    }

    #[test]
    fn test_empty_mask() {
        let mask = BinaryMask::new(4, 4).unwrap();
        let labeled = connected_component_relabel(&mask, ConnectivityType::EightWay).unwrap();
        assert!(labeled.is_empty());
    }
}
