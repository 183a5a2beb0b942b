use crate::atlas::record::PointRecord;

/// The single point under the pointer for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover<'a> {
    pub record: &'a PointRecord,
    /// Index of the record in load order.
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Index of the first position strictly closer than `pick_radius` to `mouse`.
///
/// Positions are scanned in order and the scan stops at the first hit, so a later
/// position never wins even when it is closer.
pub fn find_hover(mouse: (f64, f64), positions: &[(f64, f64)], pick_radius: f64) -> Option<usize> {
    positions
        .iter()
        .position(|&p| distance(mouse, p) < pick_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misses_return_none() {
        let positions = vec![(100.0, 100.0), (200.0, 200.0)];
        assert_eq!(find_hover((150.0, 150.0), &positions, 3.0), None);
        assert_eq!(find_hover((0.0, 0.0), &[], 3.0), None);
    }

    #[test]
    fn hit_inside_radius() {
        let positions = vec![(100.0, 100.0), (200.0, 200.0)];
        assert_eq!(find_hover((201.0, 201.0), &positions, 3.0), Some(1));
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let positions = vec![(10.0, 10.0)];
        assert_eq!(find_hover((13.0, 10.0), &positions, 3.0), None);
        assert_eq!(find_hover((12.9, 10.0), &positions, 3.0), Some(0));
    }

    #[test]
    fn earliest_index_wins_over_closer_point() {
        let positions = vec![(50.0, 50.0), (51.0, 50.0), (52.0, 50.0)];
        // index 2 is exactly under the pointer but index 0 qualifies first
        assert_eq!(find_hover((52.0, 50.0), &positions, 3.0), Some(0));
        // index 0 is out of reach, index 1 is the first qualifying
        assert_eq!(find_hover((53.5, 50.0), &positions, 3.0), Some(1));
    }

    #[test]
    fn zero_radius_never_hits() {
        assert_eq!(find_hover((5.0, 5.0), &[(5.0, 5.0)], 0.0), None);
    }
}
