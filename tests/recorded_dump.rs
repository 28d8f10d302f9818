use roidecode::{Detector, DetectorConfig, ImageView, RecordedEngine, Roi};
use serde::Deserialize;

const DUMP_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/roidecode-cli/dump.example.json"
));

#[derive(Deserialize)]
struct RegionDump {
    roi: [f32; 4],
    #[serde(default)]
    scores: Vec<f32>,
    #[serde(default)]
    deltas: Vec<f32>,
    #[serde(default)]
    failed: bool,
}

#[derive(Deserialize)]
struct Dump {
    image_width: usize,
    image_height: usize,
    num_classes: usize,
    regions: Vec<RegionDump>,
}

fn load_engine() -> RecordedEngine {
    let dump: Dump = serde_json::from_str(DUMP_JSON).unwrap();
    dump.regions.into_iter().fold(
        RecordedEngine::new(dump.image_width, dump.image_height, dump.num_classes),
        |engine, region| {
            let roi = Roi::from(region.roi);
            if region.failed {
                engine.with_failed_region(roi)
            } else {
                engine.with_region(roi, region.scores, region.deltas)
            }
        },
    )
}

fn cat_dog_config() -> DetectorConfig {
    DetectorConfig {
        class_names: ["background", "cat", "dog"]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        ..DetectorConfig::default()
    }
}

#[test]
fn example_dump_loads_into_recorded_engine() {
    let engine = load_engine();
    assert_eq!(engine.width(), 448);
    assert_eq!(engine.height(), 336);
    assert_eq!(engine.regions().len(), 5);
    assert_eq!(engine.regions()[0].roi, Roi::new(10.0, 12.0, 90.0, 100.0));
    assert!(engine.regions()[3].output.is_none());
    assert_eq!(
        engine.regions()[2].output.as_ref().map(|out| out.scores.len()),
        Some(3)
    );
}

#[test]
fn example_dump_decodes_to_ranked_detections() {
    let detector = Detector::new(load_engine(), cat_dog_config()).unwrap();
    let (width, height) = (detector.engine().width(), detector.engine().height());
    let pixels = vec![0u8; width * height * 3];
    let image = ImageView::from_slice(&pixels, width, height).unwrap();

    let dets = detector.detect(image).unwrap();
    // The second cat overlaps the first, the fourth region failed, and the
    // last one is background.
    assert_eq!(dets.len(), 2);
    assert_eq!((dets[0].label, dets[0].score), (1, 0.9));
    assert_eq!((dets[1].label, dets[1].score), (2, 0.7));
    assert_eq!(detector.class_name(dets[1].label), Some("dog"));

    let cfg = detector.config();
    for det in &dets {
        assert!(det.score > cfg.confidence_thresh);
        assert!(det.rect.x >= 0.0 && det.rect.right() <= width as f32);
        assert!(det.rect.y >= 0.0 && det.rect.bottom() <= height as f32);
    }
}
