//! Theme composition from a palette
//!
//! Palette colors are classified by brightness, saturation and warmth, then
//! assigned to roles by priority. A contrast repair pass keeps text and
//! border roles legible against the background.

use tracing::{debug, warn};

use super::model::{Gradient, PaletteSlots, Theme, ThemeRole};
use crate::accessibility::contrast::{best_text_color, contrast_ratio};
use crate::color::conversion::{hex_to_rgb, rgb_to_hex};
use crate::constants::theme as limits;
use crate::Palette;

/// Foreground roles checked against the background, with their minimum
/// ratio and replacement candidates
const REPAIRS: [(ThemeRole, f64, &[&str]); 4] = [
    (
        ThemeRole::TextOnBackground,
        limits::TEXT_MIN_CONTRAST,
        &[limits::BLACK, limits::WHITE],
    ),
    (
        ThemeRole::Border,
        limits::BORDER_MIN_CONTRAST,
        &[limits::BLACK, limits::WHITE, limits::BORDER_GRAY],
    ),
    (
        ThemeRole::BorderHover,
        limits::BORDER_MIN_CONTRAST,
        &[limits::BLACK, limits::WHITE, limits::BORDER_HOVER_GRAY],
    ),
    (
        ThemeRole::MutedText,
        limits::BORDER_MIN_CONTRAST,
        &[limits::BLACK, limits::WHITE, limits::MUTED_GRAY],
    ),
];

#[derive(Debug, Clone)]
struct ClassifiedColor {
    hex: String,
    brightness: f64,
    saturation: f64,
    warmth: f64,
}

impl ClassifiedColor {
    fn new(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(f64::from);
        Self {
            hex: rgb_to_hex(rgb),
            brightness: (r * 299.0 + g * 587.0 + b * 114.0) / 1000.0,
            saturation: r.max(g).max(b) - r.min(g).min(b),
            warmth: (r - b) / 255.0,
        }
    }
}

/// Palette colors partitioned into overlapping buckets
#[derive(Debug, Default)]
struct Buckets<'a> {
    all: Vec<&'a ClassifiedColor>,
    vivid: Vec<&'a ClassifiedColor>,
    light: Vec<&'a ClassifiedColor>,
    medium: Vec<&'a ClassifiedColor>,
    dark: Vec<&'a ClassifiedColor>,
    warm: Vec<&'a ClassifiedColor>,
    cool: Vec<&'a ClassifiedColor>,
}

impl<'a> Buckets<'a> {
    fn new(colors: &'a [ClassifiedColor]) -> Self {
        let mut buckets = Buckets {
            all: colors.iter().collect(),
            ..Default::default()
        };
        for color in colors {
            if color.saturation > limits::VIVID_SATURATION {
                buckets.vivid.push(color);
            }
            if color.brightness > limits::LIGHT_BRIGHTNESS {
                buckets.light.push(color);
            } else if color.brightness > limits::DARK_BRIGHTNESS {
                buckets.medium.push(color);
            } else {
                buckets.dark.push(color);
            }
            if color.warmth > limits::WARMTH_THRESHOLD {
                buckets.warm.push(color);
            } else if color.warmth < -limits::WARMTH_THRESHOLD {
                buckets.cool.push(color);
            }
        }

        // sort_by is stable, so equal keys keep palette order
        buckets.vivid.sort_by(|a, b| b.saturation.total_cmp(&a.saturation));
        buckets.light.sort_by(|a, b| b.brightness.total_cmp(&a.brightness));
        buckets.dark.sort_by(|a, b| a.brightness.total_cmp(&b.brightness));
        buckets
    }
}

/// First hex found among `sources`, in priority order
fn pick(sources: &[Option<&ClassifiedColor>], fallback: &str) -> String {
    sources
        .iter()
        .flatten()
        .next()
        .map_or_else(|| fallback.to_string(), |c| c.hex.clone())
}

fn nth<'a>(bucket: &[&'a ClassifiedColor], index: usize) -> Option<&'a ClassifiedColor> {
    bucket.get(index).copied()
}

/// Raise illegible foreground roles to the best fixed candidate
///
/// Returns the number of roles replaced. A repaired theme is a fixed point:
/// the better of black and white always clears both thresholds.
pub fn repair_contrast(theme: &mut Theme) -> usize {
    let background = theme.background.clone();
    let mut repaired = 0;
    for (role, minimum, candidates) in REPAIRS {
        let ratio = contrast_ratio(theme.role(role), &background);
        if ratio >= minimum {
            continue;
        }
        if let Some(best) = best_text_color(&background, candidates) {
            warn!(
                role = %role,
                from = theme.role(role),
                to = best,
                ratio,
                minimum,
                "repaired low-contrast theme color"
            );
            *theme.role_mut(role) = best.to_string();
            repaired += 1;
        }
    }
    repaired
}

/// Builds themes from palettes
#[derive(Debug, Clone, Default)]
pub struct ThemeComposer {
    fallback: Theme,
}

impl ThemeComposer {
    /// Composer falling back to the built-in default theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Composer falling back to a prior theme
    pub fn with_fallback(fallback: Theme) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> &Theme {
        &self.fallback
    }

    /// Compose a theme from an extracted palette
    pub fn compose_palette(&self, palette: &Palette) -> Theme {
        self.compose(&palette.hexes())
    }

    /// Compose a theme from palette hex strings, most significant first
    ///
    /// Entries that are not valid hex colors are skipped. When nothing usable
    /// remains the fallback theme is returned unchanged.
    pub fn compose<S: AsRef<str>>(&self, palette: &[S]) -> Theme {
        let colors: Vec<ClassifiedColor> = palette
            .iter()
            .filter_map(|hex| match hex_to_rgb(hex.as_ref()) {
                Ok(rgb) => Some(ClassifiedColor::new(rgb)),
                Err(err) => {
                    warn!(error = %err, "skipping palette entry");
                    None
                }
            })
            .collect();

        if colors.is_empty() {
            debug!("no usable palette colors, using fallback theme");
            return self.fallback.clone();
        }

        let b = Buckets::new(&colors);
        debug!(
            total = b.all.len(),
            vivid = b.vivid.len(),
            light = b.light.len(),
            medium = b.medium.len(),
            dark = b.dark.len(),
            warm = b.warm.len(),
            cool = b.cool.len(),
            "classified palette"
        );

        let fb = &self.fallback;
        let p = |i| nth(&b.all, i);
        let mut theme = Theme {
            primary: pick(&[nth(&b.vivid, 0), p(0)], &fb.primary),
            secondary: pick(&[nth(&b.vivid, 1), p(1)], &fb.secondary),
            background: pick(&[nth(&b.vivid, 2), nth(&b.medium, 0), p(2)], &fb.background),
            text_on_background: pick(&[p(3)], &fb.text_on_background),
            surface: pick(&[p(4)], &fb.surface),
            muted_text: pick(&[nth(&b.light, 0), p(5)], &fb.muted_text),
            shadow: pick(&[nth(&b.dark, 0), p(6)], &fb.shadow),
            dark_accent: pick(&[nth(&b.dark, 1), p(7)], &fb.dark_accent),
            border: fb.border.clone(),
            border_hover: fb.border_hover.clone(),
            slots: None,
        };

        // Positional fallbacks for slots mirror the primary..text roles
        let positional = [
            fb.primary.as_str(),
            fb.secondary.as_str(),
            fb.background.as_str(),
            fb.text_on_background.as_str(),
        ];
        let hex_or = |i: usize| pick(&[p(i)], positional[i]);
        theme.slots = Some(PaletteSlots {
            accents: [
                pick(&[nth(&b.warm, 0), p(0)], positional[0]),
                pick(&[nth(&b.cool, 0), p(1)], positional[1]),
                pick(&[nth(&b.medium, 0), p(2)], positional[2]),
                pick(&[nth(&b.medium, 1), p(3)], positional[3]),
            ],
            badges: [
                pick(&[nth(&b.vivid, 0), p(0)], positional[0]),
                pick(&[nth(&b.vivid, 1), p(1)], positional[1]),
                pick(&[nth(&b.vivid, 2), p(2)], positional[2]),
                hex_or(3),
                pick(&[p(4)], &fb.surface),
            ],
            gradients: [
                Gradient::new(hex_or(0), hex_or(1)),
                Gradient::new(hex_or(1), hex_or(2)),
                Gradient::new(hex_or(2), hex_or(3)),
            ],
            overlays: [0, 1, 2].map(|i| format!("{}{}", hex_or(i), limits::OVERLAY_ALPHA)),
            palette: colors.iter().map(|c| c.hex.clone()).collect(),
        });

        let repaired = repair_contrast(&mut theme);
        debug!(repaired, primary = %theme.primary, "composed theme");
        theme
    }
}
