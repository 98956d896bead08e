use ambience_core::*;
use glam::Vec2;
use rand::prelude::*;

#[derive(Default)]
struct RecordingSurface {
    clears: Vec<Vec2>,
    fills: Vec<RadialGradient>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, extent: Vec2) {
        self.clears.push(extent);
        self.fills.clear();
    }

    fn fill_radial(&mut self, gradient: &RadialGradient) {
        self.fills.push(gradient.clone());
    }
}

fn assert_fresh(blob: &Blob, extent: Vec2) {
    assert!(blob.position.x >= 0.0 && blob.position.x <= extent.x);
    assert!(blob.position.y >= 0.0 && blob.position.y <= extent.y);
    assert!(blob.radius >= 200.0 && blob.radius <= 600.0);
    assert!(blob.velocity.x.abs() <= 0.25 && blob.velocity.y.abs() <= 0.25);
    assert!(blob.peak_opacity >= 0.02 && blob.peak_opacity <= 0.07);
    assert!(BLOB_PALETTE.contains(&blob.color));
}

#[test]
fn random_blobs_stay_within_ranges() {
    let mut rng = StdRng::seed_from_u64(7);
    let extent = Vec2::new(1280.0, 720.0);
    let config = BlobFieldConfig::default();
    for _ in 0..2000 {
        assert_fresh(&random_blob(&mut rng, extent, &config), extent);
    }
}

#[test]
fn every_palette_entry_gets_used() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = BlobFieldConfig::default();
    let mut seen = [false; 3];
    for _ in 0..300 {
        let b = random_blob(&mut rng, Vec2::new(100.0, 100.0), &config);
        let i = BLOB_PALETTE.iter().position(|c| *c == b.color).unwrap();
        seen[i] = true;
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn field_holds_a_fixed_count() {
    let mut field = BlobField::with_seed(BlobFieldConfig::default(), 800.0, 600.0, 1);
    assert_eq!(field.blobs().len(), 5);
    for _ in 0..10_000 {
        field.tick();
    }
    assert_eq!(field.blobs().len(), 5);
}

#[test]
fn blob_outside_extended_bounds_resets_next_tick() {
    let extent = Vec2::new(800.0, 600.0);
    let mut field = BlobField::with_seed(BlobFieldConfig::default(), extent.x, extent.y, 2);
    {
        let blob = &mut field.blobs_mut()[0];
        blob.radius = 300.0;
        blob.position = Vec2::new(-301.0, 100.0);
        blob.velocity = Vec2::new(-0.1, 0.0);
    }
    let resets = field.tick();
    assert!(resets >= 1);
    assert_fresh(&field.blobs()[0], extent);
}

#[test]
fn blob_overlapping_the_viewport_is_kept() {
    let mut field = BlobField::with_seed(BlobFieldConfig::default(), 800.0, 600.0, 3);
    let parked = Blob {
        position: Vec2::new(-250.0, 650.0),
        radius: 300.0,
        velocity: Vec2::new(0.1, -0.1),
        color: BLOB_PALETTE[2],
        peak_opacity: 0.05,
    };
    field.blobs_mut()[1] = parked.clone();
    field.tick();
    let after = &field.blobs()[1];
    assert_eq!(after.radius, parked.radius);
    assert_eq!(after.peak_opacity, parked.peak_opacity);
    assert_eq!(after.position, parked.position + parked.velocity);
}

#[test]
fn edge_of_extended_bounds_is_still_inside() {
    let blob = Blob {
        position: Vec2::new(1100.0, -400.0),
        radius: 400.0,
        velocity: Vec2::ZERO,
        color: BLOB_PALETTE[0],
        peak_opacity: 0.03,
    };
    assert!(!blob.is_outside(Vec2::new(700.0, 500.0)));
    let past = Blob {
        position: Vec2::new(1100.5, 0.0),
        ..blob
    };
    assert!(past.is_outside(Vec2::new(700.0, 500.0)));
}

#[test]
fn resize_keeps_positions_and_resets_against_new_extent() {
    let mut field = BlobField::with_seed(BlobFieldConfig::default(), 2000.0, 2000.0, 4);
    let before: Vec<Vec2> = field.blobs().iter().map(|b| b.position).collect();
    field.resize(100.0, 100.0);
    assert_eq!(field.extent(), Vec2::new(100.0, 100.0));
    let after: Vec<Vec2> = field.blobs().iter().map(|b| b.position).collect();
    assert_eq!(before, after);

    // blobs now past 100 + radius are re-rolled into the small canvas
    field.tick();
    for b in field.blobs() {
        assert!(!b.is_outside(field.extent()));
    }
}

#[test]
fn render_clears_then_draws_each_blob_in_order() {
    let field = BlobField::with_seed(BlobFieldConfig::default(), 640.0, 480.0, 5);
    let mut surface = RecordingSurface::default();
    field.render(&mut surface);
    assert_eq!(surface.clears, vec![Vec2::new(640.0, 480.0)]);
    assert_eq!(surface.fills.len(), field.blobs().len());
    for (g, b) in surface.fills.iter().zip(field.blobs()) {
        assert_eq!(g.center, b.position);
        assert_eq!(g.radius, b.radius);
        assert_eq!(g.stops[0].alpha, b.peak_opacity);
        assert_eq!(g.stops[2].alpha, 0.0);
    }
}

#[test]
fn same_seed_same_field() {
    let mut a = BlobField::with_seed(BlobFieldConfig::default(), 500.0, 500.0, 99);
    let mut b = BlobField::with_seed(BlobFieldConfig::default(), 500.0, 500.0, 99);
    for _ in 0..5000 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.blobs(), b.blobs());
}

#[test]
fn custom_count_is_honoured() {
    let config = BlobFieldConfig {
        count: 12,
        ..Default::default()
    };
    let field = BlobField::new(config, 300.0, 300.0, StdRng::seed_from_u64(0));
    assert_eq!(field.blobs().len(), 12);
    assert_eq!(field.config().count, 12);
}
