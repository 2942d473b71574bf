pub mod pixel;

use image::Rgba;
use image::RgbaImage;

use pixel::PixelAccess;


pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// What shows through where the foreground is transparent.
pub enum Backdrop<'a> {
    Fill(Rgba<u8>),
    Image(&'a dyn PixelAccess),
}

impl<'a> Backdrop<'a> {

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        match self {
            Backdrop::Fill(color) => *color,
            Backdrop::Image(img) => img.rgba_at(x, y).unwrap_or(CLEAR),
        }
    }
}

/// Alpha exactly zero at the image's own bit depth. Coordinates outside the
/// image count as transparent.
pub fn is_transparent<P: PixelAccess + ?Sized>(img: &P, x: u32, y: u32) -> bool {
    img.alpha_is_zero(x, y).unwrap_or(true)
}

/// Builds a `width` x `height` canvas: the backdrop wherever `source` is
/// transparent, the source pixel untouched everywhere else.
pub fn composite<P: PixelAccess + ?Sized>(source: &P, backdrop: &Backdrop, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    for x in 0 .. width {
        for y in 0 .. height {
            let color = if is_transparent(source, x, y) {
                backdrop.pixel(x, y)
            } else {
                source.rgba_at(x, y).unwrap_or(CLEAR)
            };
            canvas.put_pixel(x, y, color);
        }
    }
    canvas
}
