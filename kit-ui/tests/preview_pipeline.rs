use kit_core::KitColor;
use kit_design::{DecalSlot, DesignEditStore, DesignPatch, EditorConfig, PatternStyle};
use kit_ui::{encode_png, PreviewBinding, PreviewSettings};
use pretty_assertions::assert_eq;

#[test]
fn edits_flow_through_to_the_preview() {
    let config = EditorConfig {
        tile_size: 128,
        ..Default::default()
    };
    let mut store = DesignEditStore::new(&config);
    let mut binding = PreviewBinding::new(PreviewSettings::from_config(&config));
    assert!(binding.refresh(store.state()).redraw);
    assert!(binding.tile().is_none());

    store.update(
        DesignPatch::new()
            .pattern(PatternStyle::HorizontalStripes)
            .secondary_color(KitColor::rgb(0xff, 0xd7, 0x00)),
    );
    let update = binding.refresh(store.state());
    assert!(update.texture_changed);
    let tile = binding.tile().cloned().unwrap();
    assert_eq!((tile.width(), tile.height()), (128, 128));
    assert!(!encode_png(&tile).unwrap().is_empty());

    // moving the number only re-projects
    store.toggle_side(DecalSlot::Number);
    let update = binding.refresh(store.state());
    assert!(update.redraw && !update.texture_changed);

    // undoing the pattern drops the tile again
    store.undo();
    assert!(binding.refresh(store.state()).texture_changed);
    assert!(binding.tile().is_none());
    assert_eq!(
        binding.params().map(|p| p.material.color),
        Some(KitColor::rgb(0x00, 0x55, 0xa4))
    );
}
