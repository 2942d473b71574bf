use std::path::Path;
use std::path::PathBuf;
use std::fs;
use std::fs::File;
use std::io::BufReader;

use image::DynamicImage;
use image::GenericImageView;
use image::ImageError;
use image::ImageFormat;
use image::Rgba;
use image::RgbaImage;
use image::imageops::FilterType;

use super::composite;
use super::composite::Backdrop;
use super::config;
use super::error::MergeError;
use super::error::MergeResult;
use super::resize;
use super::resize::ScaleFactor;
use super::resize::ScaleMode;


pub const DEFAULT_FOREGROUND: &'static str = "google.png";
pub const DEFAULT_BACKGROUND: &'static str = "background.jpg";
pub const DEFAULT_OUTPUT: &'static str = "Merged.png";

pub struct AppOptions {
    foreground_path: PathBuf,
    background_path: Option<PathBuf>,
    output_path: PathBuf,
    fill: Rgba<u8>,
    filter: FilterType,
    scale_mode: ScaleMode,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions {
            foreground_path: PathBuf::from(DEFAULT_FOREGROUND),
            background_path: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            fill: composite::WHITE,
            filter: FilterType::Lanczos3,
            scale_mode: ScaleMode::default(),
        }
    }
}

impl AppOptions {

    pub fn set_foreground<P: Into<PathBuf>>(&mut self, path: P) {
        self.foreground_path = path.into();
    }

    pub fn set_background<P: Into<PathBuf>>(&mut self, path: P) {
        self.background_path = Some(path.into());
    }

    pub fn clear_background(&mut self) {
        self.background_path = None;
    }

    pub fn set_output<P: Into<PathBuf>>(&mut self, path: P) {
        self.output_path = path.into();
    }

    pub fn set_fill(&mut self, color: &str) -> MergeResult<()> {
        self.fill = config::parse_color(color)?;
        Ok(())
    }

    pub fn set_filter(&mut self, filter: &str) -> MergeResult<()> {
        self.filter = config::parse_filter(filter)?;
        Ok(())
    }

    pub fn set_scale_mode(&mut self, mode: &str) -> MergeResult<()> {
        self.scale_mode = mode.parse()?;
        Ok(())
    }

    pub fn foreground(&self) -> &Path {
        self.foreground_path.as_path()
    }

    pub fn background(&self) -> Option<&Path> {
        self.background_path.as_deref()
    }

    pub fn output(&self) -> &Path {
        self.output_path.as_path()
    }

    pub fn fill(&self) -> Rgba<u8> {
        self.fill
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

pub struct Application {
    options: AppOptions,
}

impl Application {

    pub fn new(options: AppOptions) -> Self {
        Application {
            options
        }
    }

    /// Decodes every input before touching the output, so a load failure
    /// leaves the output path as it was.
    pub fn run(&self) -> MergeResult<Summary> {
        let options = &self.options;
        let foreground = load_image(options.foreground())?;
        let canvas = match options.background() {
            None => flatten(&foreground, options.fill()),
            Some(path) => {
                let background = load_image(path)?;
                merge(&foreground, &background, options.scale_mode(), options.filter())
            }
        };
        save_image(&canvas, options.output())?;
        Ok(Summary {
            output: options.output().to_path_buf(),
            width: canvas.width(),
            height: canvas.height(),
        })
    }
}

pub fn flatten(foreground: &DynamicImage, fill: Rgba<u8>) -> RgbaImage {
    let (w, h) = foreground.dimensions();
    composite::composite(foreground, &Backdrop::Fill(fill), w, h)
}

pub fn merge(foreground: &DynamicImage, background: &DynamicImage, mode: ScaleMode, filter: FilterType) -> RgbaImage {
    let (w, h) = background.dimensions();
    let factor = ScaleFactor::between(foreground.dimensions(), (w, h), mode);
    log::info!("scale foreground by {:?} ({:?})", factor, mode);
    let resized = resize::resize(foreground, factor, filter);
    composite::composite(&resized, &Backdrop::Image(background), w, h)
}

pub fn load_image(path: &Path) -> MergeResult<DynamicImage> {
    let ifile = File::open(path).map_err(|e| MergeError::load(path, e))?;
    let image = image::io::Reader::new(BufReader::new(ifile))
        .with_guessed_format()
        .map_err(|e| MergeError::load(path, e))?
        .decode()
        .map_err(|e| MergeError::load(path, e))?;
    log::info!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Encodes to a sibling temporary file and renames it over `path`.
/// Fully opaque canvases are stored as RGB.
pub fn save_image(canvas: &RgbaImage, path: &Path) -> MergeResult<()> {
    use image::buffer::ConvertBuffer;
    use image::RgbImage;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| MergeError::save(path, e))?;
        }
    }
    let tmp = temp_path(path);
    let written = if canvas.pixels().all(|p| p[3] == 255) {
        let rgb: RgbImage = canvas.convert();
        rgb.save_with_format(&tmp, ImageFormat::Png)
    } else {
        canvas.save_with_format(&tmp, ImageFormat::Png)
    };
    let result = written.and_then(|_| fs::rename(&tmp, path).map_err(ImageError::from));
    if let Err(e) = result {
        if tmp.exists() {
            if let Err(e) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {}", tmp.display(), e);
            }
        }
        return Err(MergeError::save(path, e));
    }
    log::info!("saved {} ({}x{})", path.display(), canvas.width(), canvas.height());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
