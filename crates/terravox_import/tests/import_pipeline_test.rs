//! # Import Pipeline Tests
//!
//! End-to-end runs of the import engine over real files on disk:
//! decode -> transform -> placement -> selection handoff.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terravox_import::{
    run_import, BlockColorIndex, BlockId, BlockNameResolver, Channel, ImportConfig, ImportError,
    ImportMode, Origin,
};

/// Minimal registry standing in for the real block catalogue.
struct TestRegistry {
    names: HashMap<&'static str, BlockId>,
    colors: Vec<(BlockId, [u8; 3])>,
}

impl TestRegistry {
    fn new() -> Self {
        Self {
            names: HashMap::from([("Stone", 1), ("Dirt", 2), ("Grass", 3)]),
            colors: vec![(1, [128, 128, 128]), (2, [134, 96, 67]), (3, [60, 160, 60])],
        }
    }
}

impl BlockNameResolver for TestRegistry {
    fn resolve(&self, name: &str) -> Option<BlockId> {
        self.names.get(name).copied()
    }
}

impl BlockColorIndex for TestRegistry {
    fn closest_block(&self, r: u8, g: u8, b: u8) -> Option<BlockId> {
        self.colors
            .iter()
            .min_by_key(|(_, c)| {
                let dr = i32::from(c[0]) - i32::from(r);
                let dg = i32::from(c[1]) - i32::from(g);
                let db = i32::from(c[2]) - i32::from(b);
                dr * dr + dg * dg + db * db
            })
            .map(|(id, _)| *id)
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("terravox_pipeline_{}_{name}", std::process::id()))
}

fn write_f32(name: &str, side: u32, f: impl Fn(u32, u32) -> f32) -> PathBuf {
    let path = temp_path(name);
    let mut bytes = Vec::new();
    for z in 0..side {
        for x in 0..side {
            bytes.extend_from_slice(&f(x, z).to_le_bytes());
        }
    }
    fs::write(&path, bytes).expect("write raw file");
    path
}

/// Test: a gradient heightmap stacks columns proportional to brightness.
#[test]
fn test_heightmap_import_from_raw_f32() {
    let path = write_f32("grad.f32", 4, |x, z| (x + z) as f32);

    let mut cfg = ImportConfig::new(&path);
    cfg.mode = ImportMode::Heightmap;
    cfg.origin = Origin::BottomFrontLeft;
    cfg.height_scale = 12;
    cfg.block_pattern = "Stone".to_string();

    let registry = TestRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let sel = run_import(&cfg, &registry, &registry, &mut rng).expect("import");

    assert_eq!(sel.size(), (4, 12, 4));
    assert!(sel.is_within_bounds());
    // Brightest corner (3,3) normalises to 1.0 -> full 12-block column
    let tallest = sel
        .blocks
        .iter()
        .filter(|b| b.x == 3 && b.z == 3)
        .count();
    assert_eq!(tallest, 12);
    // Darkest corner keeps the minimum single block
    let shortest = sel
        .blocks
        .iter()
        .filter(|b| b.x == 0 && b.z == 0)
        .count();
    assert_eq!(shortest, 1);
    assert!(sel.blocks.iter().all(|b| b.block_id == 1));

    fs::remove_file(&path).ok();
}

/// Test: identical seeds reproduce the exact same selection.
#[test]
fn test_import_is_deterministic_per_seed() {
    let path = write_f32("det.f32", 8, |x, z| (x * z) as f32);

    let mut cfg = ImportConfig::new(&path);
    cfg.block_pattern = "60%Stone,40%Dirt".to_string();

    let registry = TestRegistry::new();
    let mut a = ChaCha8Rng::seed_from_u64(99);
    let mut b = ChaCha8Rng::seed_from_u64(99);
    let sel_a = run_import(&cfg, &registry, &registry, &mut a).expect("import");
    let sel_b = run_import(&cfg, &registry, &registry, &mut b).expect("import");

    assert_eq!(sel_a.blocks, sel_b.blocks);
    assert_eq!(sel_a.min, sel_b.min);
    assert_eq!(sel_a.max, sel_b.max);

    fs::remove_file(&path).ok();
}

/// Test: the smoothing pass changes placement but keeps extents.
#[test]
fn test_smooth_import_keeps_extents() {
    let path = write_f32("smooth.f32", 8, |x, _| if x % 2 == 0 { 0.0 } else { 100.0 });

    let mut cfg = ImportConfig::new(&path);
    cfg.mode = ImportMode::Surface;
    cfg.height_scale = 40;
    cfg.block_pattern = "Stone".to_string();

    let registry = TestRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let rough = run_import(&cfg, &registry, &registry, &mut rng).expect("import");

    cfg.smooth = true;
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let smooth = run_import(&cfg, &registry, &registry, &mut rng).expect("import");

    assert_eq!(rough.size(), smooth.size());
    assert_eq!(rough.block_count(), smooth.block_count());
    // The alternating stripes must flatten toward the mean
    let max_y = |sel: &terravox_import::VoxelSelection| sel.blocks.iter().map(|b| b.y).max();
    let min_y = |sel: &terravox_import::VoxelSelection| sel.blocks.iter().map(|b| b.y).min();
    let rough_span = max_y(&rough).unwrap() - min_y(&rough).unwrap();
    let smooth_span = max_y(&smooth).unwrap() - min_y(&smooth).unwrap();
    assert!(
        smooth_span < rough_span,
        "smoothing did not reduce relief: {smooth_span} >= {rough_span}"
    );

    fs::remove_file(&path).ok();
}

/// Test: colormap import matches blocks by colour and honours the alpha
/// gate.
#[test]
fn test_colormap_import_with_secondary_image() {
    let hm = write_f32("cm_height.f32", 2, |_, _| 1.0);

    let cm_path = temp_path("cm.png");
    let mut cm = image::RgbaImage::new(2, 2);
    cm.put_pixel(0, 0, image::Rgba([130, 130, 130, 255])); // ~Stone
    cm.put_pixel(1, 0, image::Rgba([62, 158, 61, 255])); // ~Grass
    cm.put_pixel(0, 1, image::Rgba([135, 95, 70, 255])); // ~Dirt
    cm.put_pixel(1, 1, image::Rgba([0, 0, 0, 0])); // transparent
    cm.save(&cm_path).expect("save colormap");

    let mut cfg = ImportConfig::new(&hm);
    cfg.mode = ImportMode::Colormap;
    cfg.origin = Origin::BottomFrontLeft;
    cfg.colormap_path = Some(cm_path.clone());
    cfg.block_pattern = "Stone".to_string();

    let registry = TestRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let sel = run_import(&cfg, &registry, &registry, &mut rng).expect("import");

    // Transparent pixel is skipped
    assert_eq!(sel.block_count(), 3);
    assert_eq!(sel.size().1, 1);
    let at = |x: i32, z: i32| {
        sel.blocks
            .iter()
            .find(|b| b.x == x && b.z == z)
            .map(|b| b.block_id)
    };
    assert_eq!(at(0, 0), Some(1));
    assert_eq!(at(1, 0), Some(3));
    assert_eq!(at(0, 1), Some(2));
    assert_eq!(at(1, 1), None);

    fs::remove_file(&hm).ok();
    fs::remove_file(&cm_path).ok();
}

/// Test: an unreadable colormap is non-fatal; the block pattern takes
/// over.
#[test]
fn test_unreadable_colormap_falls_back_to_pattern() {
    let hm = write_f32("fb_height.f32", 2, |_, _| 1.0);

    let mut cfg = ImportConfig::new(&hm);
    cfg.mode = ImportMode::Colormap;
    cfg.colormap_path = Some(PathBuf::from("/nonexistent/colors.png"));
    cfg.block_pattern = "Dirt".to_string();

    let registry = TestRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let sel = run_import(&cfg, &registry, &registry, &mut rng).expect("import");

    assert_eq!(sel.block_count(), 4);
    assert!(sel.blocks.iter().all(|b| b.block_id == 2));

    fs::remove_file(&hm).ok();
}

/// Test: failures surface as a single tagged error, never a partial
/// selection.
#[test]
fn test_error_taxonomy() {
    let registry = TestRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let cfg = ImportConfig::new("/nonexistent/terrain.png");
    let err = run_import(&cfg, &registry, &registry, &mut rng).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let mut cfg = ImportConfig::new("/nonexistent/terrain.png");
    cfg.block_pattern = "Marble".to_string();
    let err = run_import(&cfg, &registry, &registry, &mut rng).unwrap_err();
    assert!(matches!(err, ImportError::InvalidBlockName { .. }));

    // 40 bytes: 10 floats, not a perfect square
    let bad = temp_path("bad.f32");
    fs::write(&bad, vec![0u8; 40]).expect("write raw file");
    let mut cfg = ImportConfig::new(&bad);
    cfg.block_pattern = "Stone".to_string();
    let err = run_import(&cfg, &registry, &registry, &mut rng).unwrap_err();
    assert!(matches!(err, ImportError::CorruptData(_)));
    fs::remove_file(&bad).ok();
}

/// Test: a PNG heightmap decodes through the configured channel.
#[test]
fn test_png_heightmap_with_channel_selection() {
    let path = temp_path("chan.png");
    let mut img = image::RgbaImage::new(1, 2);
    img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(0, 1, image::Rgba([0, 0, 0, 255]));
    img.save(&path).expect("save png");

    let mut cfg = ImportConfig::new(&path);
    cfg.mode = ImportMode::Surface;
    cfg.origin = Origin::BottomFrontLeft;
    cfg.channel = Channel::Red;
    cfg.height_scale = 10;
    cfg.block_pattern = "Stone".to_string();

    let registry = TestRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let sel = run_import(&cfg, &registry, &registry, &mut rng).expect("import");

    let y_at = |z: i32| sel.blocks.iter().find(|b| b.z == z).map(|b| b.y).unwrap();
    assert_eq!(y_at(0), 9); // red 255 -> round(1.0 * 10) - 1
    assert_eq!(y_at(1), 0); // red 0 -> floor at 0

    fs::remove_file(&path).ok();
}
