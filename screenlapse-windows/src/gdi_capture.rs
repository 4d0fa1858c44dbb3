//! Primary display capture through GDI.
//!
//! A memory DC and a compatible bitmap are created on the first grab and
//! reused afterwards; each grab is one `BitBlt` from the screen DC followed
//! by a `GetDIBits` straight into the caller's buffer.

use std::ffi::c_void;
use std::mem;

use image::RgbaImage;
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use screenlapse_core::models::error::CaptureError;
use screenlapse_core::models::frame::Rect;
use screenlapse_core::traits::screen_capturer::ScreenCapturer;

/// GDI-backed `ScreenCapturer` for the primary display.
#[derive(Default)]
pub struct GdiScreenCapturer {
    surface: Option<Surface>,
}

/// Memory DC with its own bitmap, sized to the capture area.
struct Surface {
    dc: HDC,
    bitmap: HBITMAP,
    width: u32,
    height: u32,
}

impl GdiScreenCapturer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScreenCapturer for GdiScreenCapturer {
    fn bounds(&mut self) -> Result<Rect, CaptureError> {
        let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        if width <= 0 || height <= 0 {
            return Err(CaptureError::Platform("GetSystemMetrics returned no primary screen".into()));
        }
        Ok(Rect::new(0, 0, width as u32, height as u32))
    }

    fn grab(&mut self, area: Rect, target: &mut RgbaImage) -> Result<(), CaptureError> {
        if target.dimensions() != (area.width, area.height) {
            return Err(CaptureError::Platform(format!(
                "capture area {}x{} does not match buffer {}x{}",
                area.width,
                area.height,
                target.width(),
                target.height()
            )));
        }

        unsafe {
            let screen_dc = GetDC(None);
            if screen_dc.is_invalid() {
                return Err(CaptureError::Platform("GetDC failed".into()));
            }
            let _screen_guard = ScreenDcGuard(screen_dc);

            let stale = self
                .surface
                .as_ref()
                .map_or(true, |s| s.width != area.width || s.height != area.height);
            if stale {
                // Release the old GDI objects before creating new ones.
                self.surface = None;
                self.surface = Some(Surface::new(screen_dc, area.width, area.height)?);
            }
            let Some(surface) = self.surface.as_ref() else {
                return Err(CaptureError::Platform("no capture surface".into()));
            };

            let previous = SelectObject(surface.dc, surface.bitmap.into());
            let blit = BitBlt(
                surface.dc,
                0,
                0,
                area.width as i32,
                area.height as i32,
                Some(screen_dc),
                area.x,
                area.y,
                SRCCOPY,
            );
            SelectObject(surface.dc, previous);
            blit.map_err(|e| CaptureError::Platform(format!("BitBlt failed: {}", e)))?;

            let mut info = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: area.width as i32,
                    // Negative height: top-down rows, matching the image buffer.
                    biHeight: -(area.height as i32),
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let lines = GetDIBits(
                surface.dc,
                surface.bitmap,
                0,
                area.height,
                Some(target.as_mut_ptr() as *mut c_void),
                &mut info,
                DIB_RGB_COLORS,
            );
            if lines != area.height as i32 {
                return Err(CaptureError::Platform(format!(
                    "GetDIBits copied {} of {} lines",
                    lines, area.height
                )));
            }
        }

        // GDI hands back BGRX.
        for px in target.chunks_exact_mut(4) {
            px.swap(0, 2);
            px[3] = 255;
        }
        Ok(())
    }
}

impl Surface {
    unsafe fn new(screen_dc: HDC, width: u32, height: u32) -> Result<Self, CaptureError> {
        let dc = CreateCompatibleDC(Some(screen_dc));
        if dc.is_invalid() {
            return Err(CaptureError::Platform("CreateCompatibleDC failed".into()));
        }
        let bitmap = CreateCompatibleBitmap(screen_dc, width as i32, height as i32);
        if bitmap.is_invalid() {
            let _ = DeleteDC(dc);
            return Err(CaptureError::Platform("CreateCompatibleBitmap failed".into()));
        }
        log::debug!("Created {}x{} GDI capture surface", width, height);
        Ok(Self {
            dc,
            bitmap,
            width,
            height,
        })
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.bitmap.into());
            let _ = DeleteDC(self.dc);
        }
    }
}

struct ScreenDcGuard(HDC);

impl Drop for ScreenDcGuard {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(None, self.0);
        }
    }
}
