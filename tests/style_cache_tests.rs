use std::rc::Rc;

use chart_canvas::style::{
    Appearance, BrushId, FontId, FontWeight, PenId, PenSpec, StyleCache, StylePalette, Theme,
    ThemedColor,
};
use chart_canvas::render::Color;

fn cache() -> StyleCache {
    StyleCache::new(StylePalette::standard(), Appearance::default())
}

#[test]
fn repeated_resolution_returns_the_same_resource() {
    let mut cache = cache();

    let pen_a = cache.resolve_pen(PenId::GRAPH).expect("pen");
    let pen_b = cache.resolve_pen(PenId::GRAPH).expect("pen");
    let brush_a = cache.resolve_brush(BrushId::SLICE_3).expect("brush");
    let brush_b = cache.resolve_brush(BrushId::SLICE_3).expect("brush");
    let font_a = cache.resolve_font(FontId::LEGEND).expect("font");
    let font_b = cache.resolve_font(FontId::LEGEND).expect("font");

    assert!(Rc::ptr_eq(&pen_a, &pen_b));
    assert!(Rc::ptr_eq(&brush_a, &brush_b));
    assert!(Rc::ptr_eq(&font_a, &font_b));

    let stats = cache.stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.size, 3);
}

#[test]
fn appearance_change_invalidates_every_entry() {
    let mut cache = cache();
    let before = cache.resolve_pen(PenId::AXIS).expect("pen");
    cache.resolve_font(FontId::TITLE).expect("font");
    assert_eq!(cache.len(), 2);

    cache.invalidate(Appearance::new(Theme::Dark, 2.0));
    assert!(cache.is_empty());

    let after = cache.resolve_pen(PenId::AXIS).expect("pen");
    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(after.width_px, 2.0);
    assert_ne!(before.color, after.color);
    assert_eq!(cache.stats().invalidations, 1);
}

#[test]
fn scale_factor_multiplies_widths_dashes_and_font_sizes() {
    let mut palette = StylePalette::standard();
    palette.pens.insert(
        PenId::new(50),
        PenSpec {
            width_pt: 1.5,
            color: ThemedColor::same(Color::BLACK),
            dash_pt: vec![4.0, 2.0],
        },
    );
    let mut cache = StyleCache::new(palette, Appearance::new(Theme::Light, 2.0));

    let pen = cache.resolve_pen(PenId::new(50)).expect("pen");
    assert_eq!(pen.width_px, 3.0);
    assert_eq!(pen.dash.as_slice(), &[8.0, 4.0]);
    assert!(pen.is_dashed());

    let title = cache.resolve_font(FontId::TITLE).expect("font");
    assert_eq!(title.size_px, 30.0);
    assert_eq!(title.weight, FontWeight::Bold);
}

#[test]
fn ids_outside_palette_fail_without_poisoning_the_cache() {
    let mut cache = cache();
    assert!(cache.resolve_brush(BrushId::new(7)).is_err());
    assert!(cache.resolve_font(FontId::new(0)).is_err());
    assert!(cache.resolve_brush(BrushId::LEGEND).is_ok());
    assert_eq!(cache.len(), 1);
}

#[test]
fn replacing_palette_drops_cached_entries() {
    let mut cache = cache();
    cache.resolve_pen(PenId::GRAPH).expect("pen");
    cache.set_palette(StylePalette::empty());
    assert!(cache.is_empty());
    assert!(cache.resolve_pen(PenId::GRAPH).is_err());
}
