//! Click-to-point geometry for the trend chart.

/// Rendered bounding box of the chart element, in page pixels.
#[derive(Debug, Clone, Copy)]
pub struct ChartBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// What a click landed on, once mapped to a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Index into the archive list (0 = most recent archived run).
    Archived(usize),
    /// The rightmost bucket: the report currently on screen.
    Current,
    /// Outside every bucket (negative offset, past the right edge,
    /// degenerate bounds). Silently ignored.
    Outside,
}

/// Map a click's x coordinate to a trend point.
///
/// The chart is partitioned into `archive_count + 1` equal-width
/// buckets, left to right, oldest to newest; the extra bucket is the
/// currently displayed report. This assumes the chart lays its points
/// out at uniform pixel intervals, which is an approximation of the
/// chart library's real coordinate system, not a correspondence to it.
/// A page surface that can report true point positions would replace
/// this.
pub fn resolve_click(click_x: f64, bounds: ChartBounds, archive_count: usize) -> ClickTarget {
    if bounds.width <= 0.0 {
        return ClickTarget::Outside;
    }
    let total_points = archive_count + 1;
    let point_width = bounds.width / total_points as f64;
    let offset = click_x - bounds.left;
    if offset < 0.0 {
        return ClickTarget::Outside;
    }
    let clicked = (offset / point_width).floor() as usize;
    if clicked == total_points - 1 {
        ClickTarget::Current
    } else if clicked < archive_count {
        ClickTarget::Archived(clicked)
    } else {
        ClickTarget::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds_400() -> ChartBounds {
        ChartBounds::new(0.0, 0.0, 400.0, 200.0)
    }

    #[test]
    fn test_rightmost_bucket_is_current() {
        // 3 archives -> 4 points of 100px each; x=350 lands in bucket 3.
        assert_eq!(resolve_click(350.0, bounds_400(), 3), ClickTarget::Current);
    }

    #[test]
    fn test_leftmost_bucket_is_most_recent_archive() {
        assert_eq!(
            resolve_click(50.0, bounds_400(), 3),
            ClickTarget::Archived(0)
        );
    }

    #[test]
    fn test_every_bucket_boundary() {
        assert_eq!(
            resolve_click(100.0, bounds_400(), 3),
            ClickTarget::Archived(1)
        );
        assert_eq!(
            resolve_click(299.9, bounds_400(), 3),
            ClickTarget::Archived(2)
        );
        assert_eq!(resolve_click(300.0, bounds_400(), 3), ClickTarget::Current);
    }

    #[test]
    fn test_click_left_of_chart_is_outside() {
        assert_eq!(resolve_click(-1.0, bounds_400(), 3), ClickTarget::Outside);
    }

    #[test]
    fn test_click_past_right_edge_is_outside() {
        assert_eq!(resolve_click(400.0, bounds_400(), 3), ClickTarget::Outside);
        assert_eq!(resolve_click(1000.0, bounds_400(), 3), ClickTarget::Outside);
    }

    #[test]
    fn test_nonzero_left_edge() {
        let bounds = ChartBounds::new(120.0, 40.0, 400.0, 200.0);
        assert_eq!(resolve_click(170.0, bounds, 3), ClickTarget::Archived(0));
        assert_eq!(resolve_click(470.0, bounds, 3), ClickTarget::Current);
        assert_eq!(resolve_click(100.0, bounds, 3), ClickTarget::Outside);
    }

    #[test]
    fn test_zero_archives_everything_inside_is_current() {
        assert_eq!(resolve_click(10.0, bounds_400(), 0), ClickTarget::Current);
        assert_eq!(resolve_click(399.0, bounds_400(), 0), ClickTarget::Current);
    }

    #[test]
    fn test_degenerate_width_is_outside() {
        let bounds = ChartBounds::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(resolve_click(10.0, bounds, 3), ClickTarget::Outside);
    }
}
