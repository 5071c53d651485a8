//! Theme composition module
//!
//! Maps palette colors onto named UI roles and keeps foreground roles legible
//! against the background.

pub mod model;
pub mod composer;

pub use composer::{repair_contrast, ThemeComposer};
pub use model::{Gradient, PaletteSlots, Theme, ThemeRole};
