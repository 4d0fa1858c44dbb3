use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{RgbImage, RgbaImage};

use crate::models::error::CaptureError;
use crate::models::frame::{Dimensions, Rect};
use crate::traits::screen_capturer::ScreenCapturer;

/// Largest accepted width or height for either surface.
pub const MAX_FRAME_SIDE: u32 = 16_384;

/// Resolve the saved frame size from the configured size and the screen.
///
/// - both 0: the screen's native size
/// - only width: height follows the screen aspect ratio
/// - only height: width follows the screen aspect ratio
/// - both set: used as given
pub fn resolve_dimensions(width: u32, height: u32, screen: Dimensions) -> Dimensions {
    let aspect = |num: u32, den: u32, value: u32| -> u32 {
        if den == 0 {
            return value.max(1);
        }
        let scaled = (value as f64 * num as f64 / den as f64).round();
        (scaled.min(u32::MAX as f64) as u32).max(1)
    };

    match (width, height) {
        (0, 0) => screen,
        (w, 0) => Dimensions::new(w, aspect(screen.height, screen.width, w)),
        (0, h) => Dimensions::new(aspect(screen.width, screen.height, h), h),
        (w, h) => Dimensions::new(w, h),
    }
}

/// Reusable capture surfaces.
///
/// `screen` holds the raw grab at native resolution, `output` the resized
/// frame that gets saved. Both are allocated once and never resized, so a
/// change of screen resolution mid-run keeps the original sizes.
///
/// Resizing goes through a persistent `Resizer` into an RGBA scratch image
/// at output size; the alpha channel is dropped when copying into `output`.
/// When no resize is needed the scratch image is never allocated.
pub struct FrameBuffers {
    screen: RgbaImage,
    output: RgbImage,
    scaled: Option<Image<'static>>,
    resizer: Resizer,
    options: ResizeOptions,
}

impl FrameBuffers {
    pub fn new(screen: Dimensions, output: Dimensions) -> Result<Self, CaptureError> {
        if screen.width == 0 || screen.height == 0 {
            return Err(CaptureError::Platform(format!(
                "screen reported empty bounds {}x{}",
                screen.width, screen.height
            )));
        }
        if screen.width > MAX_FRAME_SIDE || screen.height > MAX_FRAME_SIDE {
            return Err(CaptureError::Platform(format!(
                "screen bounds {}x{} exceed {}x{}",
                screen.width, screen.height, MAX_FRAME_SIDE, MAX_FRAME_SIDE
            )));
        }
        if output.width == 0 || output.height == 0 {
            return Err(CaptureError::Encode(format!(
                "output size {}x{} is empty",
                output.width, output.height
            )));
        }
        if output.width > MAX_FRAME_SIDE || output.height > MAX_FRAME_SIDE {
            return Err(CaptureError::Encode(format!(
                "output size {}x{} exceeds {}x{}",
                output.width, output.height, MAX_FRAME_SIDE, MAX_FRAME_SIDE
            )));
        }

        log::info!(
            "Allocating frame buffers: screen {}x{}, output {}x{}",
            screen.width,
            screen.height,
            output.width,
            output.height
        );

        let scaled = (screen != output).then(|| Image::new(output.width, output.height, PixelType::U8x4));

        Ok(Self {
            screen: RgbaImage::new(screen.width, screen.height),
            output: RgbImage::new(output.width, output.height),
            scaled,
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom)),
        })
    }

    pub fn screen_size(&self) -> Dimensions {
        Dimensions::new(self.screen.width(), self.screen.height())
    }

    pub fn output_size(&self) -> Dimensions {
        Dimensions::new(self.output.width(), self.output.height())
    }

    pub fn output(&self) -> &RgbImage {
        &self.output
    }

    /// Grab the screen at `bounds` and resample it into the output buffer.
    ///
    /// The grabbed area keeps the origin of `bounds` but the size of the
    /// screen buffer.
    pub fn capture_and_resize<S: ScreenCapturer + ?Sized>(
        &mut self,
        screen: &mut S,
        bounds: Rect,
    ) -> Result<(), CaptureError> {
        let area = bounds.with_size(self.screen_size());
        if area != bounds {
            log::debug!(
                "Screen bounds changed to {}x{}, still capturing {}x{}",
                bounds.width,
                bounds.height,
                area.width,
                area.height
            );
        }

        screen.grab(area, &mut self.screen)?;
        self.resize()
    }

    fn resize(&mut self) -> Result<(), CaptureError> {
        let Some(scaled) = self.scaled.as_mut() else {
            copy_rgb(self.screen.as_raw(), &mut self.output);
            return Ok(());
        };

        let source = ImageRef::new(
            self.screen.width(),
            self.screen.height(),
            self.screen.as_raw(),
            PixelType::U8x4,
        )
        .map_err(|e| CaptureError::Encode(format!("screen buffer rejected by resizer: {e}")))?;
        self.resizer
            .resize(&source, scaled, &self.options)
            .map_err(|e| CaptureError::Encode(format!("resize failed: {e}")))?;

        copy_rgb(scaled.buffer(), &mut self.output);
        Ok(())
    }
}

/// Copy tightly packed RGBA8 into an RGB8 image of the same size.
fn copy_rgb(rgba: &[u8], output: &mut RgbImage) {
    for (out, px) in output.chunks_exact_mut(3).zip(rgba.chunks_exact(4)) {
        out.copy_from_slice(&px[..3]);
    }
}
