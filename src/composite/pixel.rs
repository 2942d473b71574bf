use std::ops::Deref;

use image::DynamicImage;
use image::GenericImageView;
use image::ImageBuffer;
use image::Pixel;
use image::Rgba;


/// Read-only RGBA8 access over any decoded image layout.
///
/// Layouts without an alpha channel report every pixel as opaque.
pub trait PixelAccess {

    /// `None` outside `[0, width) x [0, height)`.
    fn rgba_at(&self, x: u32, y: u32) -> Option<Rgba<u8>>;

    /// Alpha tested at the native bit depth, before any narrowing to 8 bits.
    fn alpha_is_zero(&self, x: u32, y: u32) -> Option<bool> {
        self.rgba_at(x, y).map(|pixel| pixel[3] == 0)
    }
}

impl<P, C> PixelAccess for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8> + 'static,
    C: Deref<Target = [P::Subpixel]>,
{
    fn rgba_at(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(self.get_pixel(x, y).to_rgba())
        } else {
            None
        }
    }
}

impl PixelAccess for DynamicImage {

    fn rgba_at(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if self.in_bounds(x, y) {
            Some(self.get_pixel(x, y))
        } else {
            None
        }
    }

    fn alpha_is_zero(&self, x: u32, y: u32) -> Option<bool> {
        if !self.in_bounds(x, y) {
            return None;
        }
        match self {
            DynamicImage::ImageRgba16(buf) => Some(buf.get_pixel(x, y)[3] == 0),
            DynamicImage::ImageLumaA16(buf) => Some(buf.get_pixel(x, y)[1] == 0),
            _ => Some(self.get_pixel(x, y)[3] == 0),
        }
    }
}
