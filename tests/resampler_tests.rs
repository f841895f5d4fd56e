use bevy::prelude::Vec3;
use bevy_terrain_helper::{
    Heightfield, HeightfieldStore, HeightmapImporter, HeightmapResolution, ImportMode, PixelGrid,
    TerrainData, TerrainHelperError, export_heightmap, grayscale, io,
};

fn gray(v: f32) -> [f32; 4] {
    [v, v, v, 1.0]
}

fn gradient_image(size: u32) -> PixelGrid {
    let mut image = PixelGrid::new(size, size);
    let max = (2 * (size - 1)) as f32;
    for y in 0..size {
        for x in 0..size {
            let r = x as f32 / (size - 1) as f32;
            let g = (x + y) as f32 / max;
            let b = y as f32 / (size - 1) as f32;
            image.set(x, y, [r, g, b, 1.0]);
        }
    }
    image
}

#[test]
fn uniform_gray_with_intensity_fills_target() {
    let image = PixelGrid::filled(33, 33, gray(0.5));
    let heights = HeightmapImporter::new()
        .with_mode(ImportMode::FitToTarget)
        .with_intensity(0.4)
        .resample(&image, 33)
        .unwrap();
    assert_eq!(heights.resolution(), 33);
    for h in heights.data() {
        assert!((h - 0.2).abs() < 1e-6, "expected 0.2, got {h}");
    }
}

#[test]
fn non_square_image_is_rejected_without_mutation() {
    let image = PixelGrid::filled(40, 60, gray(1.0));
    let mut terrain = TerrainData::new(HeightmapResolution::R33).with_heights(Heightfield::from_fn(33, 33, |_, _| 0.3));
    let before = terrain.all_heights();

    let err = HeightmapImporter::new()
        .with_mode(ImportMode::ResizeTargetToMatch)
        .import_into(&image, &mut terrain)
        .unwrap_err();

    assert!(matches!(err, TerrainHelperError::NotSquare { width: 40, height: 60 }));
    assert!(err.is_invalid_input());
    assert_eq!(terrain.heightmap_resolution(), 33);
    assert_eq!(terrain.all_heights(), before);
}

#[test]
fn resize_mode_rejects_invalid_resolution() {
    let image = PixelGrid::filled(40, 40, gray(0.5));
    let err = HeightmapImporter::new()
        .with_mode(ImportMode::ResizeTargetToMatch)
        .resample(&image, 33)
        .unwrap_err();
    assert!(matches!(err, TerrainHelperError::UnsupportedResolution(40)));
}

#[test]
fn resize_mode_invalid_resolution_leaves_store_untouched() {
    let image = PixelGrid::filled(40, 40, gray(0.9));
    let size = Vec3::new(64.0, 10.0, 64.0);
    let mut terrain = TerrainData::new(HeightmapResolution::R33)
        .with_size(size)
        .with_heights(Heightfield::from_fn(33, 33, |r, c| (r + c) as f32 / 64.0));
    let before = terrain.all_heights();

    let err = HeightmapImporter::new()
        .with_mode(ImportMode::ResizeTargetToMatch)
        .import_into(&image, &mut terrain)
        .unwrap_err();

    assert!(matches!(err, TerrainHelperError::UnsupportedResolution(40)));
    assert_eq!(terrain.heightmap_resolution(), 33);
    assert_eq!(terrain.size(), size);
    assert_eq!(terrain.all_heights(), before);
}

#[test]
fn empty_image_is_rejected_in_every_mode() {
    let image = PixelGrid::new(0, 0);
    for mode in [ImportMode::FitToTarget, ImportMode::ResizeTargetToMatch] {
        let err = HeightmapImporter::new()
            .with_mode(mode)
            .resample(&image, 33)
            .unwrap_err();
        assert!(
            matches!(err, TerrainHelperError::UnsupportedResolution(0)),
            "{mode:?}: {err}"
        );
    }

    let mut terrain = TerrainData::new(HeightmapResolution::R33);
    assert!(HeightmapImporter::new().import_into(&image, &mut terrain).is_err());
    assert_eq!(terrain.heightmap_resolution(), 33);
}

#[test]
fn fit_mode_accepts_any_square_size() {
    let image = PixelGrid::filled(40, 40, gray(0.5));
    let heights = HeightmapImporter::new().resample(&image, 33).unwrap();
    assert_eq!(heights.rows(), 33);
    assert_eq!(heights.cols(), 33);
}

#[test]
fn resize_mode_copies_pixels_exactly_and_keeps_size() {
    let image = gradient_image(65);
    let size = Vec3::new(64.0, 10.0, 64.0);
    let mut terrain = TerrainData::new(HeightmapResolution::R33).with_size(size);

    HeightmapImporter::new()
        .with_mode(ImportMode::ResizeTargetToMatch)
        .with_intensity(0.75)
        .import_into(&image, &mut terrain)
        .unwrap();

    assert_eq!(terrain.heightmap_resolution(), 65);
    assert_eq!(terrain.size(), size);

    let heights = terrain.all_heights();
    for y in 0..65 {
        for x in 0..65 {
            let expected = grayscale(image.get(x, y)) * 0.75;
            assert_eq!(heights.get(x as usize, y as usize), expected);
        }
    }
}

#[test]
fn fit_mode_stays_in_range_and_matches_corners() {
    let image = gradient_image(100);
    let intensity = 0.6;
    let heights = HeightmapImporter::new()
        .with_intensity(intensity)
        .resample(&image, 65)
        .unwrap();

    assert_eq!(heights.resolution(), 65);
    for h in heights.data() {
        assert!(*h >= 0.0 && *h <= intensity + 1e-6, "{h} out of [0, {intensity}]");
    }

    let corners = [(0, 0, 0, 0), (64, 0, 99, 0), (0, 64, 0, 99), (64, 64, 99, 99)];
    for (hx, hy, px, py) in corners {
        let expected = grayscale(image.get(px, py)) * intensity;
        assert_eq!(heights.get(hx, hy), expected, "corner ({hx}, {hy})");
    }
}

#[test]
fn fit_import_into_store_keeps_resolution() {
    let image = PixelGrid::filled(100, 100, gray(1.0));
    let mut terrain = TerrainData::new(HeightmapResolution::R129);
    HeightmapImporter::new().import_into(&image, &mut terrain).unwrap();
    assert_eq!(terrain.heightmap_resolution(), 129);
}

#[test]
fn intensity_is_clamped() {
    assert_eq!(HeightmapImporter::new().with_intensity(3.0).intensity(), 1.0);
    assert_eq!(HeightmapImporter::new().with_intensity(-1.0).intensity(), 0.0);
}

#[test]
fn export_writes_heights_into_every_channel() {
    let heights = Heightfield::from_fn(33, 33, |r, c| (r * 33 + c) as f32 / (33.0 * 33.0));
    let image = export_heightmap(&heights);
    assert_eq!(image.width(), 33);
    assert_eq!(image.height(), 33);
    let h = heights.get(5, 7);
    assert_eq!(image.get(5, 7), [h, h, h, 1.0]);
}

#[test]
fn png_round_trip_reproduces_heights() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heights.png");

    let original = Heightfield::from_fn(65, 65, |r, c| ((r * 7 + c * 3) % 65) as f32 / 64.0);
    io::save_png(&export_heightmap(&original), &path).unwrap();

    let loaded = io::load_image(&path).unwrap();
    let mut terrain = TerrainData::new(HeightmapResolution::R33);
    HeightmapImporter::new()
        .with_mode(ImportMode::ResizeTargetToMatch)
        .import_into(&loaded, &mut terrain)
        .unwrap();

    let restored = terrain.all_heights();
    for (a, b) in original.data().iter().zip(restored.data()) {
        assert!((a - b).abs() <= 0.5 / 255.0 + 1e-5, "{a} vs {b}");
    }
}

#[test]
fn png16_round_trip_is_finer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heights16.png");

    let original = Heightfield::from_fn(33, 33, |r, c| (r + c) as f32 / 64.0 * 0.999);
    io::save_png16(&export_heightmap(&original), &path).unwrap();

    let restored = HeightmapImporter::new()
        .with_mode(ImportMode::ResizeTargetToMatch)
        .resample(&io::load_image(&path).unwrap(), 33)
        .unwrap();
    for (a, b) in original.data().iter().zip(restored.data()) {
        assert!((a - b).abs() < 1e-4, "{a} vs {b}");
    }
}

#[test]
fn files_store_top_row_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orientation.png");

    let mut image = PixelGrid::new(4, 4);
    image.set(0, 0, gray(1.0));
    io::save_png(&image, &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(0, 3).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);

    assert_eq!(io::load_image(&path).unwrap().get(0, 0), gray(1.0));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = io::load_image(dir.path().join("nope.png")).unwrap_err();
    assert_eq!(err.kind(), bevy_terrain_helper::ErrorKind::Io);
}
