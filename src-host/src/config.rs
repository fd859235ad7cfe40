//! Runtime configuration loaded from the environment (and `.env`).

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use photobooth_engine::frame::{DEFAULT_DATE_FORMAT, DEFAULT_WATERMARK};
use photobooth_engine::{FrameColor, Theme};

/// A scripted drag gesture: move overlay `index` by dragging from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragScript {
    pub index: usize,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: Option<PathBuf>,
    pub frame_color: FrameColor,
    pub theme: Theme,
    pub font: Option<PathBuf>,
    pub watermark: String,
    pub date_format: String,
    /// Date printed on the frame; today when unset.
    pub date: Option<NaiveDate>,
    pub output_dir: PathBuf,
    pub drags: Vec<DragScript>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: None,
            frame_color: FrameColor::default(),
            theme: Theme::default(),
            font: None,
            watermark: DEFAULT_WATERMARK.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            date: None,
            output_dir: crate::data_dir(),
            drags: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve each key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { lookup(key).unwrap_or_default().trim().to_string() };
        let defaults = Self::default();

        let frame_color = match g("PHOTOBOOTH_FRAME_COLOR").as_str() {
            "" => defaults.frame_color,
            s => s.parse::<FrameColor>().context("PHOTOBOOTH_FRAME_COLOR")?,
        };
        let theme = match g("PHOTOBOOTH_THEME").as_str() {
            "" => defaults.theme,
            s => s.parse::<Theme>().context("PHOTOBOOTH_THEME")?,
        };
        let date = match g("PHOTOBOOTH_DATE").as_str() {
            "" => None,
            s => Some(
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .with_context(|| format!("PHOTOBOOTH_DATE must be YYYY-MM-DD, got {s:?}"))?,
            ),
        };

        Ok(Self {
            input: non_empty_path(g("PHOTOBOOTH_INPUT")),
            frame_color,
            theme,
            font: non_empty_path(g("PHOTOBOOTH_FONT")),
            watermark: or_default(g("PHOTOBOOTH_WATERMARK"), defaults.watermark),
            date_format: or_default(g("PHOTOBOOTH_DATE_FORMAT"), defaults.date_format),
            date,
            output_dir: non_empty_path(g("PHOTOBOOTH_OUTPUT_DIR")).unwrap_or(defaults.output_dir),
            drags: parse_drags(&g("PHOTOBOOTH_DRAGS"))?,
        })
    }
}

fn non_empty_path(s: String) -> Option<PathBuf> {
    if s.is_empty() { None } else { Some(PathBuf::from(s)) }
}

fn or_default(s: String, default: String) -> String {
    if s.is_empty() { default } else { s }
}

/// Parse `index:x0,y0>x1,y1` entries separated by `;`.
pub fn parse_drags(s: &str) -> Result<Vec<DragScript>, anyhow::Error> {
    s.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_drag)
        .collect()
}

fn parse_drag(entry: &str) -> Result<DragScript, anyhow::Error> {
    let Some((index, path)) = entry.split_once(':') else {
        bail!("drag {entry:?} is missing the overlay index");
    };
    let Some((from, to)) = path.split_once('>') else {
        bail!("drag {entry:?} must look like index:x0,y0>x1,y1");
    };
    let index = index
        .trim()
        .parse()
        .with_context(|| format!("invalid overlay index in drag {entry:?}"))?;
    Ok(DragScript {
        index,
        from: parse_point(from).with_context(|| format!("invalid start in drag {entry:?}"))?,
        to: parse_point(to).with_context(|| format!("invalid end in drag {entry:?}"))?,
    })
}

fn parse_point(s: &str) -> Result<(f32, f32), anyhow::Error> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected x,y but got {s:?}");
    };
    Ok((x.trim().parse()?, y.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.frame_color, FrameColor::Black);
        assert_eq!(config.theme, Theme::None);
        assert_eq!(config.watermark, "Photobooth App");
        assert!(config.input.is_none());
        assert!(config.drags.is_empty());
    }

    #[test]
    fn values_are_read_from_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_string_lossy().to_string();
        let config = AppConfig::from_lookup(lookup(&[
            ("PHOTOBOOTH_INPUT", "selfie.jpg"),
            ("PHOTOBOOTH_FRAME_COLOR", "Pink"),
            ("PHOTOBOOTH_THEME", "cute"),
            ("PHOTOBOOTH_DATE", "2024-12-25"),
            ("PHOTOBOOTH_OUTPUT_DIR", &out),
            ("PHOTOBOOTH_DRAGS", "0:100,100>150,130"),
        ]))
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("selfie.jpg")));
        assert_eq!(config.frame_color, FrameColor::Pink);
        assert_eq!(config.theme, Theme::Cute);
        assert_eq!(config.date, NaiveDate::from_ymd_opt(2024, 12, 25));
        assert_eq!(config.output_dir, dir.path());
        assert_eq!(
            config.drags,
            vec![DragScript {
                index: 0,
                from: (100.0, 100.0),
                to: (150.0, 130.0)
            }]
        );
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(AppConfig::from_lookup(lookup(&[("PHOTOBOOTH_FRAME_COLOR", "teal")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("PHOTOBOOTH_THEME", "spooky")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("PHOTOBOOTH_DATE", "25/12/2024")])).is_err());
    }

    #[test]
    fn drag_scripts_parse() {
        let drags = parse_drags(" 2:0,0>-5.5,10 ; ;1:3,4>3,4").unwrap();
        assert_eq!(drags.len(), 2);
        assert_eq!(drags[0].index, 2);
        assert_eq!(drags[0].to, (-5.5, 10.0));
        assert_eq!(drags[1].from, (3.0, 4.0));

        assert!(parse_drags("0:1,2").is_err());
        assert!(parse_drags("x:1,2>3,4").is_err());
        assert!(parse_drags("0:1>3,4").is_err());
    }
}
