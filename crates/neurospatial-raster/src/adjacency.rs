//! Region adjacency extraction
//!
//! Two distinct nonzero labels touch when some pair of neighboring pixels
//! carries them. Each pixel is compared with its forward neighbors only
//! (right and down, plus both lower diagonals for 8-way), which visits every
//! neighboring pair exactly once.

use crate::conncomp::ConnectivityType;
use crate::error::RasterResult;
use neurospatial_core::{LabelMap, RegionAdjacencyGraph};

/// Build the region adjacency graph of `map`
///
/// # Arguments
///
/// * `map` - Input label map (usually a dilated population)
/// * `connectivity` - Which neighboring pixels count as touching
pub fn region_adjacency(
    map: &LabelMap,
    connectivity: ConnectivityType,
) -> RasterResult<RegionAdjacencyGraph> {
    let (width, height) = (map.width() as usize, map.height() as usize);
    let data = map.data();
    let mut rag = RegionAdjacencyGraph::new(map.max_label());

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let label = data[idx];
            if label == 0 {
                continue;
            }
            if x + 1 < width {
                rag.add_edge(label, data[idx + 1]);
            }
            if y + 1 < height {
                rag.add_edge(label, data[idx + width]);
                if connectivity == ConnectivityType::EightWay {
                    if x + 1 < width {
                        rag.add_edge(label, data[idx + width + 1]);
                    }
                    if x > 0 {
                        rag.add_edge(label, data[idx + width - 1]);
                    }
                }
            }
        }
    }

    tracing::trace!(edges = rag.edge_count(), ?connectivity, "extracted adjacency");
    Ok(rag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurospatial_test::fixtures::map_from_rows;

    #[test]
    fn test_touching_labels() {
        let map = map_from_rows(&[&[1, 1, 2], &[3, 0, 2], &[3, 3, 0]]);
        let rag = region_adjacency(&map, ConnectivityType::FourWay).unwrap();
        assert!(rag.contains(1, 2));
        assert!(rag.contains(1, 3));
        assert!(!rag.contains(2, 3));
        assert_eq!(rag.degrees(), vec![0, 2, 1, 1]);
    }

    #[test]
    fn test_diagonal_only_with_eight_way() {
        let map = map_from_rows(&[&[1, 0], &[0, 2]]);
        let four = region_adjacency(&map, ConnectivityType::FourWay).unwrap();
        let eight = region_adjacency(&map, ConnectivityType::EightWay).unwrap();
        assert_eq!(four.edge_count(), 0);
        assert!(eight.contains(2, 1));

        let anti = map_from_rows(&[&[0, 1], &[2, 0]]);
        let eight = region_adjacency(&anti, ConnectivityType::EightWay).unwrap();
        assert!(eight.contains(1, 2));
    }

    #[test]
    fn test_background_separates() {
        let map = map_from_rows(&[&[1, 0, 2]]);
        let rag = region_adjacency(&map, ConnectivityType::EightWay).unwrap();
        assert_eq!(rag.edge_count(), 0);
    }
}
