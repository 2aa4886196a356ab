//! Rendered glyph cache
//!
//! Glyph bitmaps have the theme color and the pixel density baked in, so the
//! cache is keyed by (glyph, theme) and must be invalidated whenever the
//! theme or density the overlay draws with changes.

use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::icon::{render_glyph, GlyphKind};
use crate::overlay::Theme;

/// Glyph bitmaps rendered at one pixel density
#[derive(Debug)]
pub struct GlyphCache {
    scale: f32,
    entries: HashMap<(GlyphKind, Theme), Arc<RgbaImage>>,
    renders: usize,
}

impl GlyphCache {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            entries: HashMap::new(),
            renders: 0,
        }
    }

    /// Get the bitmap for `kind` drawn in `theme`'s foreground, rendering it on first use
    pub fn get(&mut self, kind: GlyphKind, theme: Theme) -> Arc<RgbaImage> {
        let scale = self.scale;
        let renders = &mut self.renders;
        self.entries
            .entry((kind, theme))
            .or_insert_with(|| {
                debug!("Rendering {} glyph for {} theme at {}x", kind.name(), theme.name(), scale);
                *renders += 1;
                Arc::new(render_glyph(kind, theme.foreground(), scale))
            })
            .clone()
    }

    /// Change the pixel density; drops every entry when it actually changes
    pub fn set_scale(&mut self, scale: f32) {
        if (scale - self.scale).abs() > f32::EPSILON {
            self.scale = scale;
            self.invalidate();
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Evict every cached bitmap
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!("Invalidating {} cached glyphs", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bitmaps rendered over the cache's lifetime
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuses_rendered_glyph() {
        let mut cache = GlyphCache::new(2.0);
        let first = cache.get(GlyphKind::Success, Theme::Dark);
        let second = cache.get(GlyphKind::Success, Theme::Dark);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.render_count(), 1);
        assert_eq!(first.width(), 72);
    }

    #[test]
    fn test_theme_switch_yields_fresh_bitmap() {
        let mut cache = GlyphCache::default();
        let dark = cache.get(GlyphKind::Success, Theme::Dark);
        cache.invalidate();
        let light = cache.get(GlyphKind::Success, Theme::Light);

        assert!(!Arc::ptr_eq(&dark, &light));
        assert_ne!(*dark, *light);
        assert_eq!(cache.render_count(), 2);
    }

    #[test]
    fn test_invalidate_clears_everything() {
        let mut cache = GlyphCache::default();
        for kind in GlyphKind::ALL {
            cache.get(kind, Theme::Light);
        }
        assert_eq!(cache.len(), 3);

        cache.invalidate();
        assert!(cache.is_empty());

        cache.get(GlyphKind::Info, Theme::Light);
        assert_eq!(cache.render_count(), 4);
    }

    #[test]
    fn test_scale_change_invalidates() {
        let mut cache = GlyphCache::new(1.0);
        cache.get(GlyphKind::Error, Theme::Dark);

        cache.set_scale(1.0);
        assert_eq!(cache.len(), 1);

        cache.set_scale(3.0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(GlyphKind::Error, Theme::Dark).width(), 108);
        assert_eq!(cache.scale(), 3.0);
    }
}
