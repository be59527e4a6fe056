//! Scroll synchronization between the editor and preview panes
//!
//! The two panes have independently sized content, so positions are
//! exchanged as a normalized scroll fraction in [0, 1] rather than raw
//! pixel offsets. The editor reports its metrics every frame; the view
//! controller converts them to a fraction and forwards it to the preview,
//! but only while both fullscreen and sync-scroll are active. Outside that
//! condition the panes scroll independently.

/// Scroll geometry of a vertical scroll region, captured after layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset in points
    pub offset: f32,
    /// Total height of the laid-out content
    pub content_height: f32,
    /// Height of the visible viewport
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Create metrics from raw scroll geometry.
    pub fn new(offset: f32, content_height: f32, viewport_height: f32) -> Self {
        Self {
            offset,
            content_height,
            viewport_height,
        }
    }

    /// The scrollable span: content height minus viewport height,
    /// never negative.
    pub fn scrollable_span(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Whether the content overflows the viewport.
    pub fn is_overflowing(&self) -> bool {
        self.scrollable_span() > 0.0
    }

    /// Normalized vertical position in [0, 1].
    ///
    /// Zero when the region does not overflow.
    pub fn fraction(&self) -> f32 {
        let span = self.scrollable_span();
        if span <= 0.0 {
            0.0
        } else {
            (self.offset / span).clamp(0.0, 1.0)
        }
    }

    /// Scroll offset corresponding to `fraction` in this region.
    ///
    /// The fraction is clamped to [0, 1] first.
    pub fn offset_for_fraction(&self, fraction: f32) -> f32 {
        fraction.clamp(0.0, 1.0) * self.scrollable_span()
    }
}

/// Whether editor scroll events are forwarded to the preview.
///
/// Forwarding happens only while fullscreen and sync-scroll are both
/// active; every other combination leaves the panes independent.
pub fn should_forward(fullscreen: bool, sync_scroll: bool) -> bool {
    fullscreen && sync_scroll
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_at_extremes() {
        let top = ScrollMetrics::new(0.0, 1000.0, 200.0);
        assert_eq!(top.fraction(), 0.0);

        let bottom = ScrollMetrics::new(800.0, 1000.0, 200.0);
        assert_eq!(bottom.fraction(), 1.0);
    }

    #[test]
    fn test_fraction_midpoint() {
        let metrics = ScrollMetrics::new(400.0, 1000.0, 200.0);
        assert!((metrics.fraction() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fraction_zero_when_not_overflowing() {
        let exact = ScrollMetrics::new(0.0, 200.0, 200.0);
        assert_eq!(exact.fraction(), 0.0);
        assert!(!exact.is_overflowing());

        let smaller = ScrollMetrics::new(50.0, 100.0, 200.0);
        assert_eq!(smaller.fraction(), 0.0);
    }

    #[test]
    fn test_fraction_clamped_on_overscroll() {
        // Elastic overscroll can report offsets past the span
        let metrics = ScrollMetrics::new(900.0, 1000.0, 200.0);
        assert_eq!(metrics.fraction(), 1.0);

        let negative = ScrollMetrics::new(-10.0, 1000.0, 200.0);
        assert_eq!(negative.fraction(), 0.0);
    }

    #[test]
    fn test_offset_for_fraction_round_trip() {
        let metrics = ScrollMetrics::new(0.0, 3000.0, 450.0);
        for f in [0.0, 0.1, 0.25, 0.5, 0.75, 0.99, 1.0] {
            let offset = metrics.offset_for_fraction(f);
            let applied = ScrollMetrics::new(offset, 3000.0, 450.0);
            assert!(
                (applied.fraction() - f).abs() < 1e-5,
                "round trip failed for fraction {}",
                f
            );
        }
    }

    #[test]
    fn test_offset_for_fraction_clamps_input() {
        let metrics = ScrollMetrics::new(0.0, 1000.0, 200.0);
        assert_eq!(metrics.offset_for_fraction(2.0), 800.0);
        assert_eq!(metrics.offset_for_fraction(-1.0), 0.0);
    }

    #[test]
    fn test_offset_for_fraction_no_overflow() {
        let metrics = ScrollMetrics::new(0.0, 100.0, 200.0);
        assert_eq!(metrics.offset_for_fraction(0.7), 0.0);
    }

    #[test]
    fn test_forwarding_truth_table() {
        assert!(!should_forward(false, false));
        assert!(!should_forward(false, true));
        assert!(!should_forward(true, false));
        assert!(should_forward(true, true));
    }
}
