use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{ChartError, ChartResult, StyleKind};

use super::{
    Appearance, BrushId, BrushPatternSpec, DashLengths, FillPattern, FontId, PenId, ResolvedBrush,
    ResolvedFont, ResolvedPen, StylePalette,
};

/// Runtime metrics exposed by the style cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub invalidations: u64,
}

/// Per-canvas memo of resolved pens, brushes and fonts.
///
/// Entries are created lazily on first use and shared as `Rc` so repeated
/// lookups hand back the same resource until [`StyleCache::invalidate`].
#[derive(Debug)]
pub struct StyleCache {
    palette: StylePalette,
    appearance: Appearance,
    pens: HashMap<PenId, Rc<ResolvedPen>>,
    brushes: HashMap<BrushId, Rc<ResolvedBrush>>,
    fonts: HashMap<FontId, Rc<ResolvedFont>>,
    hits: u64,
    misses: u64,
    invalidations: u64,
}

impl StyleCache {
    #[must_use]
    pub fn new(palette: StylePalette, appearance: Appearance) -> Self {
        Self {
            palette,
            appearance,
            pens: HashMap::new(),
            brushes: HashMap::new(),
            fonts: HashMap::new(),
            hits: 0,
            misses: 0,
            invalidations: 0,
        }
    }

    #[must_use]
    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    #[must_use]
    pub fn palette(&self) -> &StylePalette {
        &self.palette
    }

    /// Drops every resolved resource and adopts `appearance` for later lookups.
    pub fn invalidate(&mut self, appearance: Appearance) {
        debug!(
            theme = ?appearance.theme,
            scale_factor = appearance.scale_factor(),
            cached = self.len(),
            "invalidate style cache"
        );
        self.appearance = appearance;
        self.clear_entries();
        self.invalidations = self.invalidations.saturating_add(1);
    }

    /// Swaps the palette; cached entries from the old palette are discarded.
    pub fn set_palette(&mut self, palette: StylePalette) {
        self.palette = palette;
        self.clear_entries();
        self.invalidations = self.invalidations.saturating_add(1);
    }

    pub fn resolve_pen(&mut self, id: PenId) -> ChartResult<Rc<ResolvedPen>> {
        if let Some(pen) = self.pens.get(&id) {
            self.hits = self.hits.saturating_add(1);
            return Ok(Rc::clone(pen));
        }
        let spec = self.palette.pens.get(&id).ok_or(ChartError::UnknownStyleId {
            kind: StyleKind::Pen,
            id: id.raw(),
        })?;
        let scale = self.appearance.scale_factor();
        let pen = Rc::new(ResolvedPen {
            width_px: spec.width_pt * scale,
            color: spec.color.pick(self.appearance.theme),
            dash: spec.dash_pt.iter().map(|len| len * scale).collect::<DashLengths>(),
        });
        trace!(pen = %id, width_px = pen.width_px, "resolve pen");
        self.misses = self.misses.saturating_add(1);
        self.pens.insert(id, Rc::clone(&pen));
        Ok(pen)
    }

    pub fn resolve_brush(&mut self, id: BrushId) -> ChartResult<Rc<ResolvedBrush>> {
        if let Some(brush) = self.brushes.get(&id) {
            self.hits = self.hits.saturating_add(1);
            return Ok(Rc::clone(brush));
        }
        let spec = self
            .palette
            .brushes
            .get(&id)
            .ok_or(ChartError::UnknownStyleId {
                kind: StyleKind::Brush,
                id: id.raw(),
            })?;
        let theme = self.appearance.theme;
        let pattern = match spec.pattern {
            BrushPatternSpec::Solid => None,
            BrushPatternSpec::VerticalGradient { to } => {
                Some(FillPattern::VerticalGradient { to: to.pick(theme) })
            }
        };
        let brush = Rc::new(ResolvedBrush {
            color: spec.color.pick(theme),
            pattern,
        });
        trace!(brush = %id, "resolve brush");
        self.misses = self.misses.saturating_add(1);
        self.brushes.insert(id, Rc::clone(&brush));
        Ok(brush)
    }

    pub fn resolve_font(&mut self, id: FontId) -> ChartResult<Rc<ResolvedFont>> {
        if let Some(font) = self.fonts.get(&id) {
            self.hits = self.hits.saturating_add(1);
            return Ok(Rc::clone(font));
        }
        let spec = self.palette.fonts.get(&id).ok_or(ChartError::UnknownStyleId {
            kind: StyleKind::Font,
            id: id.raw(),
        })?;
        let font = Rc::new(ResolvedFont {
            family: spec.family.clone(),
            size_px: spec.size_pt * self.appearance.scale_factor(),
            weight: spec.weight,
            color: spec.color.pick(self.appearance.theme),
        });
        trace!(font = %id, size_px = font.size_px, "resolve font");
        self.misses = self.misses.saturating_add(1);
        self.fonts.insert(id, Rc::clone(&font));
        Ok(font)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pens.len() + self.brushes.len() + self.fonts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> StyleCacheStats {
        StyleCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.len(),
            invalidations: self.invalidations,
        }
    }

    fn clear_entries(&mut self) {
        self.pens.clear();
        self.brushes.clear();
        self.fonts.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::StyleCache;
    use crate::error::{ChartError, StyleKind};
    use crate::style::{Appearance, BrushId, FillPattern, PenId, StylePalette, Theme};

    #[test]
    fn brush_gradient_pattern_follows_theme() {
        let mut cache = StyleCache::new(StylePalette::standard(), Appearance::default());
        let light = cache.resolve_brush(BrushId::GRAPH_NORMAL).expect("light brush");
        cache.invalidate(Appearance::new(Theme::Dark, 1.0));
        let dark = cache.resolve_brush(BrushId::GRAPH_NORMAL).expect("dark brush");

        assert!(matches!(light.pattern, Some(FillPattern::VerticalGradient { .. })));
        assert_ne!(light.color, dark.color);
        assert!(!Rc::ptr_eq(&light, &dark));
    }

    #[test]
    fn unknown_pen_reports_kind_and_id() {
        let mut cache = StyleCache::new(StylePalette::standard(), Appearance::default());
        let err = cache.resolve_pen(PenId::new(999)).expect_err("unknown pen");
        assert_eq!(
            err,
            ChartError::UnknownStyleId {
                kind: StyleKind::Pen,
                id: 999
            }
        );
        assert!(cache.is_empty());
    }
}
