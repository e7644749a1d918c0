/// Maximum number of parallel lanes a segment can carry.
pub const MAX_LANES: usize = 2;

/// Per-segment lane presence.
///
/// Lane 0 lies on the left of the centre line, lane 1 on the right. A
/// single-lane road uses only slot 0, which then spans both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneSet {
    present: [bool; MAX_LANES],
    count: usize,
}

impl Default for LaneSet {
    fn default() -> Self {
        Self::new(MAX_LANES)
    }
}

impl LaneSet {
    /// All `count` lanes present.
    pub fn new(count: usize) -> Self {
        debug_assert!((1..=MAX_LANES).contains(&count), "lane count {count}");
        Self {
            present: [true; MAX_LANES],
            count,
        }
    }

    /// Number of lane slots configured for the road.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.present[..self.count]
    }

    #[inline]
    pub fn is_present(&self, lane: usize) -> bool {
        lane < self.count && self.present[lane]
    }

    /// Number of lanes currently present.
    pub fn num_present(&self) -> usize {
        self.as_slice().iter().filter(|&&p| p).count()
    }

    /// Mark `lane` absent. The last present lane is never removed.
    pub fn remove(&mut self, lane: usize) {
        debug_assert!(lane < self.count, "lane {lane} out of {}", self.count);
        if self.is_present(lane) && self.num_present() > 1 {
            self.present[lane] = false;
        }
    }

    /// Lane widths covered on the (left, right) side of the centre line.
    pub fn side_coverage(&self) -> (f64, f64) {
        if self.count == 1 {
            return (1.0, 1.0);
        }
        let side = |lane: usize| if self.is_present(lane) { 1.0 } else { 0.0 };
        (side(0), side(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_lane() {
        let lanes = LaneSet::new(1);
        assert_eq!(lanes.as_slice(), &[true]);
        assert_eq!(lanes.side_coverage(), (1.0, 1.0));
    }

    #[test]
    fn test_remove_keeps_one_lane() {
        let mut lanes = LaneSet::default();
        lanes.remove(1);
        assert_eq!(lanes.as_slice(), &[true, false]);
        assert_eq!(lanes.side_coverage(), (1.0, 0.0));
        lanes.remove(0);
        assert_eq!(lanes.num_present(), 1);
    }
}
