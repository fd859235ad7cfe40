use proptest::prelude::*;

use crate::{OverlayLayer, StickerLibrary, Theme};

fn pointer() -> impl Strategy<Value = (f32, f32)> {
    (-2000i32..2000, -2000i32..2000).prop_map(|(x, y)| (x as f32, y as f32))
}

fn theme() -> impl Strategy<Value = Theme> {
    prop::sample::select(vec![Theme::Girlypop, Theme::Cute, Theme::Party])
}

proptest! {
    #[test]
    fn final_position_depends_only_on_first_and_last_pointer(
        theme in theme(),
        index in 0usize..3,
        start in pointer(),
        moves in prop::collection::vec(pointer(), 1..20),
    ) {
        let mut layer = OverlayLayer::new();
        layer.set_theme(theme, 800, 600, &StickerLibrary::with_placeholders());
        let id = layer.overlays()[index].id();
        let (ox, oy) = layer.overlays()[index].position();

        layer.begin_drag(id, start.0, start.1);
        for &(x, y) in &moves {
            layer.update_drag(x, y);
        }
        layer.end_drag();

        let last = moves[moves.len() - 1];
        let expected = (ox + (last.0 - start.0), oy + (last.1 - start.1));
        prop_assert_eq!(layer.get(id).unwrap().position(), expected);
    }

    #[test]
    fn begin_drag_while_dragging_keeps_target(
        first in 0usize..3,
        second in 0usize..3,
        a in pointer(),
        b in pointer(),
    ) {
        let mut layer = OverlayLayer::new();
        layer.set_theme(Theme::Party, 640, 480, &StickerLibrary::with_placeholders());
        let first_id = layer.overlays()[first].id();
        let second_id = layer.overlays()[second].id();

        layer.begin_drag(first_id, a.0, a.1);
        layer.begin_drag(second_id, b.0, b.1);

        let session = layer.drag_session().copied().unwrap();
        prop_assert_eq!(session.target, first_id);
        prop_assert_eq!(session.pointer_start, a);
    }

    #[test]
    fn placement_count_matches_theme(
        theme in theme(),
        width in 1u32..4000,
        height in 1u32..4000,
    ) {
        let mut layer = OverlayLayer::new();
        layer.set_theme(theme, width, height, &StickerLibrary::with_placeholders());
        prop_assert_eq!(layer.overlays().len(), theme.overlay_specs().len());
        for overlay in layer.overlays() {
            prop_assert!(overlay.z() < crate::overlay::DRAG_Z);
        }
    }
}
