use std::str::FromStr;

use image::imageops;
use image::imageops::FilterType;
use image::GenericImageView;
use image::Rgba;
use image::RgbaImage;

use crate::error::MergeError;


/// How the foreground is fitted onto the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    /// Independent factors per axis; the foreground covers the background exactly.
    Stretch,
    /// Single truncated height ratio, width follows from the aspect ratio.
    Height,
}

impl Default for ScaleMode {

    fn default() -> Self {
        ScaleMode::Stretch
    }
}

impl FromStr for ScaleMode {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stretch" => Ok(ScaleMode::Stretch),
            "height" => Ok(ScaleMode::Height),
            _ => Err(MergeError::config(format!("unknown scale mode `{}`", s))),
        }
    }
}


/// Per-axis multipliers. Zero on one axis means "follow the other axis".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    pub horizontal: f32,
    pub vertical: f32,
}

impl ScaleFactor {

    pub const IDENTITY: ScaleFactor = ScaleFactor { horizontal: 1.0, vertical: 1.0 };

    pub fn new(horizontal: f32, vertical: f32) -> Self {
        ScaleFactor { horizontal, vertical }
    }

    pub fn between(foreground: (u32, u32), background: (u32, u32), mode: ScaleMode) -> Self {
        let (fw, fh) = foreground;
        let (bw, bh) = background;
        if fw == 0 || fh == 0 {
            return Self::IDENTITY;
        }
        match mode {
            ScaleMode::Stretch => ScaleFactor::new(bw as f32 / fw as f32, bh as f32 / fh as f32),
            ScaleMode::Height => ScaleFactor::new((bh / fh) as f32, 0.0),
        }
    }

    /// Replaces zero (or otherwise unusable) factors so neither axis collapses.
    pub fn resolve(&self) -> Self {
        let usable = |f: f32| f.is_finite() && f > 0.0;
        match (usable(self.horizontal), usable(self.vertical)) {
            (true, true) => *self,
            (true, false) => ScaleFactor::new(self.horizontal, self.horizontal),
            (false, true) => ScaleFactor::new(self.vertical, self.vertical),
            (false, false) => {
                log::warn!("degenerate scale factor {:?}, keeping original size", self);
                Self::IDENTITY
            }
        }
    }

    pub fn target_size(&self, size: (u32, u32)) -> (u32, u32) {
        let factor = self.resolve();
        (scale_dim(size.0, factor.horizontal), scale_dim(size.1, factor.vertical))
    }
}

fn scale_dim(dim: u32, factor: f32) -> u32 {
    if dim == 0 {
        0
    } else {
        std::cmp::max((dim as f32 * factor).round() as u32, 1)
    }
}


pub fn resize<I>(image: &I, factor: ScaleFactor, filter: FilterType) -> RgbaImage
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (w, h) = image.dimensions();
    let (tw, th) = factor.target_size((w, h));
    log::debug!("resize {}x{} by {:?} -> {}x{}", w, h, factor, tw, th);
    if (tw, th) == (w, h) {
        RgbaImage::from_fn(w, h, |x, y| image.get_pixel(x, y))
    } else {
        imageops::resize(image, tw, th, filter)
    }
}


#[cfg(test)]
mod test {

    use std::str::FromStr;

    use image::imageops::FilterType;
    use image::DynamicImage;
    use image::Rgba;
    use image::RgbaImage;

    use super::resize;
    use super::ScaleFactor;
    use super::ScaleMode;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 17) as u8, (y * 29) as u8, ((x + y) * 5) as u8, if x % 3 == 0 { 0 } else { 255 }]))
    }

    #[test]
    fn test_stretch_factors() {
        let f = ScaleFactor::between((4, 8), (12, 4), ScaleMode::Stretch);
        assert_eq!(f, ScaleFactor::new(3.0, 0.5));
        assert_eq!(f.target_size((4, 8)), (12, 4));
    }

    #[test]
    fn test_height_factor_truncates() {
        let f = ScaleFactor::between((10, 3), (100, 10), ScaleMode::Height);
        assert_eq!(f, ScaleFactor::new(3.0, 0.0));
        assert_eq!(f.resolve(), ScaleFactor::new(3.0, 3.0));
        assert_eq!(f.target_size((10, 3)), (30, 9));
    }

    #[test]
    fn test_zero_factor_falls_back() {
        assert_eq!(ScaleFactor::new(0.0, 2.0).resolve(), ScaleFactor::new(2.0, 2.0));
        assert_eq!(ScaleFactor::new(0.0, 0.0).resolve(), ScaleFactor::IDENTITY);
        assert_eq!(ScaleFactor::new(std::f32::NAN, 0.0).resolve(), ScaleFactor::IDENTITY);
    }

    #[test]
    fn test_taller_foreground_not_degenerate() {
        let fg = gradient(4, 8);
        let f = ScaleFactor::between((4, 8), (6, 5), ScaleMode::Height);
        assert_eq!(f.horizontal, 0.0);
        let out = resize(&fg, f, FilterType::Lanczos3);
        assert_eq!(out.dimensions(), (4, 8));
    }

    #[test]
    fn test_tiny_factor_keeps_one_pixel() {
        let fg = gradient(4, 8);
        let out = resize(&fg, ScaleFactor::new(0.01, 0.01), FilterType::Triangle);
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn test_identity_is_exact() {
        let fg = gradient(7, 5);
        let out = resize(&fg, ScaleFactor::IDENTITY, FilterType::Lanczos3);
        assert_eq!(out, fg);

        let dynamic = DynamicImage::ImageRgba8(fg.clone());
        let out = resize(&dynamic, ScaleFactor::new(1.0, 1.0), FilterType::Lanczos3);
        assert_eq!(out.into_raw(), fg.into_raw());
    }

    #[test]
    fn test_upscale_dimensions() {
        let fg = gradient(3, 2);
        let out = resize(&fg, ScaleFactor::new(2.0, 3.0), FilterType::Nearest);
        assert_eq!(out.dimensions(), (6, 6));
    }

    #[test]
    fn test_scale_mode_parse() {
        assert_eq!(ScaleMode::from_str("stretch").unwrap(), ScaleMode::Stretch);
        assert_eq!(ScaleMode::from_str("height").unwrap(), ScaleMode::Height);
        assert!(ScaleMode::from_str("width").is_err());
    }
}
