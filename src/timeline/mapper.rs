//! Pixel <-> Time Coordinate Mapping
//!
//! Pure functions converting between scrolled/zoomed pixel space and
//! continuous time. Clamping lives here and nowhere else, so the
//! mapping stays invertible and independently testable: for any pixel
//! in the viewport, `to_pixel(to_time(x)) == x` within float tolerance
//! at fixed zoom and scroll.

// ============================================================================
// Constants
// ============================================================================

/// Minimum waveform zoom factor (1x = fit to base width)
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum waveform zoom factor
pub const MAX_ZOOM: f64 = 16.0;

// ============================================================================
// View state
// ============================================================================

/// Derived view parameters: zoom factor and horizontal scroll offset in
/// pixels. Not part of the persisted project state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Zoom factor, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`]
    pub zoom: f64,
    /// Horizontal scroll offset in canvas pixels
    pub scroll_offset: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            scroll_offset: 0.0,
        }
    }
}

impl ViewState {
    /// Set the zoom factor, clamped to the valid range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Total canvas width for this view over the given viewport.
    pub fn canvas_width(&self, viewport_width: f64, base_width: f64) -> f64 {
        canvas_width(viewport_width, base_width, self.zoom)
    }
}

// ============================================================================
// Pure mapping functions
// ============================================================================

/// Total canvas width: the zoomed base width, never narrower than the
/// viewport.
pub fn canvas_width(viewport_width: f64, base_width: f64, zoom: f64) -> f64 {
    let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    (base_width * zoom).max(viewport_width)
}

/// Convert a viewport-relative pixel position to seconds.
///
/// The result is clamped to [0, duration]. Degenerate geometry (zero or
/// negative canvas width or duration) maps everything to 0.
pub fn to_time(pixel_x: f64, scroll_offset: f64, canvas_width: f64, duration: f64) -> f64 {
    if canvas_width <= 0.0 || duration <= 0.0 {
        return 0.0;
    }
    let absolute_x = pixel_x + scroll_offset;
    let seconds = (absolute_x / canvas_width) * duration;
    seconds.clamp(0.0, duration)
}

/// Convert seconds to a viewport-relative pixel position.
///
/// Inverse of [`to_time`] for in-range values: the absolute pixel for a
/// given (seconds, zoom) pair is identical regardless of scroll, and the
/// scroll offset is subtracted to land in viewport space. Degenerate
/// geometry returns 0.
pub fn to_pixel(seconds: f64, scroll_offset: f64, canvas_width: f64, duration: f64) -> f64 {
    if canvas_width <= 0.0 || duration <= 0.0 {
        return 0.0;
    }
    (seconds / duration) * canvas_width - scroll_offset
}

// ============================================================================
// Tests
// ============================================================================
