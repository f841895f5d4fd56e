use bevy::render::render_resource::TextureFormat;
use bevy_terrain_helper::{Heightfield, TerrainHelperError, alphamaps_to_splat_images, splat_to_image};

fn layer(res: usize, value: f32) -> Heightfield {
    Heightfield::from_fn(res, res, |_, _| value)
}

#[test]
fn empty_layers_yield_no_images() {
    assert!(alphamaps_to_splat_images(&[]).unwrap().is_empty());
}

#[test]
fn four_layers_per_image() {
    let layers: Vec<Heightfield> = [0.0, 0.25, 0.5, 0.75, 1.0].map(|v| layer(8, v)).into();
    let splats = alphamaps_to_splat_images(&layers).unwrap();
    assert_eq!(splats.len(), 2);
    assert_eq!(splats[0].get(3, 3), [0.0, 0.25, 0.5, 0.75]);
    // Only R is backed by a layer in the second image.
    assert_eq!(splats[1].get(3, 3), [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn layer_row_maps_to_pixel_y() {
    let mut weights = layer(4, 0.0);
    weights.set(1, 2, 1.0);
    let splats = alphamaps_to_splat_images(&[weights]).unwrap();
    assert_eq!(splats[0].get(2, 1)[0], 1.0);
    assert_eq!(splats[0].get(1, 2)[0], 0.0);
}

#[test]
fn mismatched_layers_are_rejected() {
    let err = alphamaps_to_splat_images(&[layer(8, 0.0), layer(4, 0.0)]).unwrap_err();
    assert!(matches!(
        err,
        TerrainHelperError::MismatchedLayers { layer: 1, rows: 4, cols: 4 }
    ));
}

#[test]
fn image_dimensions_match_layers() {
    let splats = alphamaps_to_splat_images(&[layer(16, 0.5)]).unwrap();
    let image = splat_to_image(&splats[0]);
    assert_eq!(image.texture_descriptor.size.width, 16);
    assert_eq!(image.texture_descriptor.size.height, 16);
    assert_eq!(image.texture_descriptor.format, TextureFormat::Rgba8Unorm);
}

#[test]
fn image_data_is_top_row_first() {
    let mut weights = layer(2, 0.0);
    // Bottom-left pixel in texture space.
    weights.set(0, 0, 1.0);
    let splats = alphamaps_to_splat_images(&[weights]).unwrap();
    let image = splat_to_image(&splats[0]);
    let data = image.data.as_ref().expect("image must have data");

    assert_eq!(data.len(), 2 * 2 * 4);
    // Second row in the buffer is the bottom row.
    assert_eq!(&data[8..12], &[255, 0, 0, 0]);
    assert_eq!(&data[0..4], &[0, 0, 0, 0]);
}
