use image::RgbaImage;

use crate::models::error::CaptureError;
use crate::models::frame::Rect;

/// Interface for platform-specific screen grabbing.
///
/// Implemented by:
/// - `GdiScreenCapturer` (Windows)
/// - deterministic stubs in tests
pub trait ScreenCapturer {
    /// Current bounds of the primary display. Queried on every tick.
    fn bounds(&mut self) -> Result<Rect, CaptureError>;

    /// Copy the pixels under `area` into `target`, unscaled.
    ///
    /// `area` always has the same size as `target`. Implementations must not
    /// reallocate `target`.
    fn grab(&mut self, area: Rect, target: &mut RgbaImage) -> Result<(), CaptureError>;
}
