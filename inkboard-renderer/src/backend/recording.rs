//! Recording surface for headless runs and tests.
//!
//! Instead of producing pixels this surface keeps the list of operations it
//! was asked to perform, and logs each one.

use inkboard_core::Point;

use crate::{RenderResult, StrokeStyle};

use super::Surface;

/// One operation performed on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// The surface was cleared.
    Clear,
    /// A path was stroked.
    Stroke {
        /// Path points in order.
        points: Vec<Point>,
        /// Paint parameters.
        style: StrokeStyle,
    },
}

/// Surface that records operations instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Create a recording surface with the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Operations performed since the last clear, including that clear.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of straight segments stroked since the last clear.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                SurfaceOp::Stroke { points, .. } => points.len().saturating_sub(1),
                SurfaceOp::Clear => 0,
            })
            .sum()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        // Earlier frames are fully overwritten, so only the latest is kept.
        self.ops.clear();
        self.ops.push(SurfaceOp::Clear);
        tracing::trace!("Recording clear {}x{}", self.width, self.height);
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) -> RenderResult<()> {
        tracing::trace!(
            "Recording stroke: {} points color={} width={}",
            points.len(),
            style.color,
            style.width
        );
        self.ops.push(SurfaceOp::Stroke {
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    #[test]
    fn test_clear_discards_previous_frame() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.clear();
        surface
            .stroke_polyline(
                &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
                &StrokeStyle::round(Rgba::BLACK, 1.0),
            )
            .expect("stroke");
        assert_eq!(surface.segment_count(), 1);

        surface.clear();
        assert_eq!(surface.ops(), &[SurfaceOp::Clear]);
        assert_eq!(surface.segment_count(), 0);
    }
}
