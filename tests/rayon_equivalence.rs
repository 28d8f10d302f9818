#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roidecode::{Detector, DetectorConfig, ImageView, RecordedEngine, Roi, VOC_CLASSES};

fn make_engine(width: usize, height: usize, regions: usize, seed: u64) -> RecordedEngine {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_classes = VOC_CLASSES.len();
    let mut engine = RecordedEngine::new(width, height, num_classes);
    for i in 0..regions {
        let x1 = rng.random_range(0.0..width as f32 * 0.8);
        let y1 = rng.random_range(0.0..height as f32 * 0.8);
        let roi = Roi::new(
            x1,
            y1,
            x1 + rng.random_range(8.0..80.0f32),
            y1 + rng.random_range(8.0..80.0f32),
        );
        if i % 17 == 0 {
            engine = engine.with_failed_region(roi);
            continue;
        }
        // Concentrate mass on a few classes so many regions pass the gate.
        let mut scores = vec![0.01f32; num_classes];
        let label = 1 + i % 4;
        scores[label] = rng.random_range(0.3..0.99f32);
        let deltas = (0..8).map(|_| rng.random_range(-0.2..0.2f32)).collect();
        engine = engine.with_region(roi, scores, deltas);
    }
    engine
}

#[test]
fn parallel_matches_sequential() {
    let (width, height) = (320, 240);
    let base_cfg = DetectorConfig {
        target_size: 240,
        confidence_thresh: 0.4,
        nms_threshold: 0.45,
        max_per_image: 50,
        num_threads: 4,
        ..DetectorConfig::default()
    };
    let seq_cfg = DetectorConfig {
        parallel: false,
        ..base_cfg.clone()
    };
    let par_cfg = DetectorConfig {
        parallel: true,
        ..base_cfg
    };

    let seq = Detector::new(make_engine(width, height, 300, 21), seq_cfg).unwrap();
    let par = Detector::new(make_engine(width, height, 300, 21), par_cfg).unwrap();

    let pixels = vec![0u8; width * height * 3];
    let image = ImageView::from_slice(&pixels, width, height).unwrap();
    let seq_dets = seq.detect(image).unwrap();
    let par_dets = par.detect(image).unwrap();

    assert!(!seq_dets.is_empty());
    assert_eq!(seq_dets, par_dets);
}
