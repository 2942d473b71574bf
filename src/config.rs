use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use image::imageops::FilterType;
use image::Rgba;
use serde::Deserialize;

use crate::application::AppOptions;
use crate::error::MergeError;
use crate::error::MergeResult;


/// Optional JSON file layered between the defaults and the command line.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub foreground: Option<PathBuf>,
    pub background: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub fill: Option<String>,
    pub filter: Option<String>,
    pub scale_mode: Option<String>,
}

impl ConfigFile {

    pub fn load(path: &Path) -> MergeResult<Self> {
        let ifile = File::open(path)
            .map_err(|e| MergeError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(ifile))
            .map_err(|e| MergeError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn apply(self, options: &mut AppOptions) -> MergeResult<()> {
        if let Some(path) = self.foreground {
            options.set_foreground(path);
        }
        if let Some(path) = self.background {
            options.set_background(path);
        }
        if let Some(path) = self.output {
            options.set_output(path);
        }
        if let Some(fill) = self.fill {
            options.set_fill(&fill)?;
        }
        if let Some(filter) = self.filter {
            options.set_filter(&filter)?;
        }
        if let Some(mode) = self.scale_mode {
            options.set_scale_mode(&mode)?;
        }
        Ok(())
    }
}


pub fn parse_filter(filter: &str) -> MergeResult<FilterType> {
    match filter {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" => Ok(FilterType::Triangle),
        "gaussian" => Ok(FilterType::Gaussian),
        "catmullrom" => Ok(FilterType::CatmullRom),
        "lanczos3" => Ok(FilterType::Lanczos3),
        _ => Err(MergeError::config(format!("unknown filter `{}`", filter))),
    }
}

/// `#RRGGBB` or `#RRGGBBAA`, the `#` is optional.
pub fn parse_color(color: &str) -> MergeResult<Rgba<u8>> {
    let invalid = || MergeError::config(format!("invalid colour `{}`", color));
    let hex = color.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let mut c = [0u8, 0, 0, 255];
    for (i, slot) in c.iter_mut().enumerate().take(hex.len() / 2) {
        *slot = u8::from_str_radix(&hex[i * 2 .. i * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(Rgba(c))
}
