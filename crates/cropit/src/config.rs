// Author: Dustin Pilgrim
// License: GPLv3

use std::path::{Path, PathBuf};

use cropit_core::{AspectRatio, Size};
use rune_cfg::RuneConfig;

use crate::paths;

pub const DEFAULT_JPEG_QUALITY: u8 = 90;
pub const DEFAULT_CONTAINER: Size = Size { w: 800.0, h: 600.0 };

#[derive(Debug, Clone)]
pub struct CropitConfig {
    pub output_directory: PathBuf,
    pub upload_endpoint: Option<String>,
    pub upload_token: Option<String>,
    pub jpeg_quality: u8,
    pub container: Size,
    pub aspect: AspectRatio,
}

impl Default for CropitConfig {
    fn default() -> Self {
        Self {
            output_directory: paths::default_output_dir(),
            upload_endpoint: None,
            upload_token: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            container: DEFAULT_CONTAINER,
            aspect: AspectRatio::Free,
        }
    }
}

impl CropitConfig {
    /// Bearer token: $CROPIT_TOKEN wins over the config file.
    pub fn effective_token(&self) -> Option<String> {
        std::env::var("CROPIT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.upload_token.clone())
    }
}

/// Load the config at `path` (or the default location). A missing file means
/// defaults.
pub fn load(path: Option<&Path>) -> Result<CropitConfig, String> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::default_config_path);

    if !path.exists() {
        return Ok(CropitConfig::default());
    }

    let rc = RuneConfig::from_file(&path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;

    parse_config(&rc)
}

fn get_string(rc: &RuneConfig, key: &str) -> Result<Option<String>, String> {
    rc.get_optional::<String>(key)
        .map_err(|e| format!("config error at {key}: {e}"))
}

fn parse_config(rc: &RuneConfig) -> Result<CropitConfig, String> {
    let mut cfg = CropitConfig::default();

    if !rc.has("cropit") {
        return Ok(cfg);
    }

    if let Some(dir) = get_string(rc, "cropit.output_directory")? {
        let dir = paths::expand_env(dir.trim());
        if !dir.is_empty() {
            cfg.output_directory = PathBuf::from(dir);
        }
    }

    if let Some(endpoint) = get_string(rc, "cropit.upload_endpoint")? {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            cfg.upload_endpoint = Some(endpoint.to_string());
        }
    }

    if let Some(token) = get_string(rc, "cropit.upload_token")? {
        let token = paths::expand_env(token.trim());
        if !token.is_empty() {
            cfg.upload_token = Some(token);
        }
    }

    if let Some(q) = get_string(rc, "cropit.jpeg_quality")? {
        cfg.jpeg_quality =
            parse_quality(&q).map_err(|e| format!("config error at cropit.jpeg_quality: {e}"))?;
    }

    if let Some(c) = get_string(rc, "cropit.container")? {
        cfg.container = parse_size(&c).map_err(|e| format!("config error at cropit.container: {e}"))?;
    }

    if let Some(a) = get_string(rc, "cropit.aspect")? {
        cfg.aspect = a
            .parse()
            .map_err(|e| format!("config error at cropit.aspect: {e}"))?;
    }

    Ok(cfg)
}

pub fn parse_quality(s: &str) -> Result<u8, String> {
    let q: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("expected a number 1-100, got \"{}\"", s.trim()))?;
    if !(1..=100).contains(&q) {
        return Err(format!("quality must be 1-100, got {q}"));
    }
    Ok(q)
}

/// `WxH` with positive sides, e.g. `800x600`.
pub fn parse_size(s: &str) -> Result<Size, String> {
    let s = s.trim().to_lowercase();
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WxH, got \"{s}\""))?;

    let w: f64 = w.trim().parse().map_err(|_| format!("invalid width in \"{s}\""))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("invalid height in \"{s}\""))?;

    let size = Size::new(w, h);
    if !size.is_usable() {
        return Err(format!("size must be positive, got \"{s}\""));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(Some(&dir.path().join("nope.rune"))).unwrap();
        assert_eq!(cfg.jpeg_quality, DEFAULT_JPEG_QUALITY);
        assert_eq!(cfg.container, DEFAULT_CONTAINER);
        assert_eq!(cfg.aspect, AspectRatio::Free);
        assert!(cfg.upload_endpoint.is_none());
    }

    #[test]
    fn quality_range_is_enforced() {
        assert_eq!(parse_quality(" 85 ").unwrap(), 85);
        assert!(parse_quality("0").is_err());
        assert!(parse_quality("101").is_err());
        assert!(parse_quality("high").is_err());
    }

    #[test]
    fn sizes_parse() {
        assert_eq!(parse_size("800x600").unwrap(), Size::new(800.0, 600.0));
        assert_eq!(parse_size(" 1024X768 ").unwrap(), Size::new(1024.0, 768.0));
        assert!(parse_size("800").is_err());
        assert!(parse_size("0x600").is_err());
        assert!(parse_size("axb").is_err());
    }
}
