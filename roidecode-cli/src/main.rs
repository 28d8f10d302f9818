use clap::Parser;
use roidecode::io::load_bgr_image;
use roidecode::{
    DeltaLayout, Detection, Detector, DetectorConfig, ImageView, OwnedImage, RecordedEngine, Roi,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Decode recorded two-stage detector outputs (JSON config driven)"
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
enum DeltaLayoutConfig {
    ClassAgnostic { offset: usize },
    PerClass,
}

impl From<DeltaLayoutConfig> for DeltaLayout {
    fn from(value: DeltaLayoutConfig) -> Self {
        match value {
            DeltaLayoutConfig::ClassAgnostic { offset } => DeltaLayout::ClassAgnostic { offset },
            DeltaLayoutConfig::PerClass => DeltaLayout::PerClass,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectorConfigJson {
    target_size: usize,
    max_per_image: usize,
    confidence_thresh: f32,
    nms_threshold: f32,
    num_threads: usize,
    class_names: Vec<String>,
    mean_vals: [f32; 3],
    delta_layout: Option<DeltaLayoutConfig>,
    parallel: bool,
}

impl Default for DetectorConfigJson {
    fn default() -> Self {
        let cfg = DetectorConfig::default();
        Self {
            target_size: cfg.target_size,
            max_per_image: cfg.max_per_image,
            confidence_thresh: cfg.confidence_thresh,
            nms_threshold: cfg.nms_threshold,
            num_threads: cfg.num_threads,
            class_names: cfg.class_names,
            mean_vals: cfg.mean_vals,
            delta_layout: None,
            parallel: cfg.parallel,
        }
    }
}

impl From<DetectorConfigJson> for DetectorConfig {
    fn from(value: DetectorConfigJson) -> Self {
        Self {
            target_size: value.target_size,
            max_per_image: value.max_per_image,
            confidence_thresh: value.confidence_thresh,
            nms_threshold: value.nms_threshold,
            num_threads: value.num_threads,
            class_names: value.class_names,
            mean_vals: value.mean_vals,
            delta_layout: value.delta_layout.map(Into::into).unwrap_or_default(),
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    dump_path: String,
    image_path: Option<String>,
    output_path: Option<String>,
    detector: DetectorConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dump_path: String::new(),
            image_path: None,
            output_path: None,
            detector: DetectorConfigJson::default(),
        }
    }
}

/// One region of a recorded network run.
#[derive(Debug, Deserialize)]
struct RegionDump {
    roi: [f32; 4],
    #[serde(default)]
    scores: Vec<f32>,
    #[serde(default)]
    deltas: Vec<f32>,
    /// The runtime failed to extract this region.
    #[serde(default)]
    failed: bool,
}

#[derive(Debug, Deserialize)]
struct Dump {
    image_width: usize,
    image_height: usize,
    num_classes: usize,
    regions: Vec<RegionDump>,
}

impl From<Dump> for RecordedEngine {
    fn from(dump: Dump) -> Self {
        let mut engine = RecordedEngine::new(dump.image_width, dump.image_height, dump.num_classes);
        for region in dump.regions {
            let roi = Roi::from(region.roi);
            engine = if region.failed {
                engine.with_failed_region(roi)
            } else {
                engine.with_region(roi, region.scores, region.deltas)
            };
        }
        engine
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    label: usize,
    class_name: Option<String>,
    score: f32,
}

impl DetectionRecord {
    fn new(det: &Detection, class_names: &[String]) -> Self {
        Self {
            x: det.rect.x,
            y: det.rect.y,
            w: det.rect.w,
            h: det.rect.h,
            label: det.label,
            class_name: det.class_name(class_names).map(str::to_owned),
            score: det.score,
        }
    }
}

/// Resolves `path` against the directory holding the config file.
fn resolve_path(config_path: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    match config_path.parent() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

#[derive(Debug, Serialize)]
struct Output {
    count: usize,
    detections: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("roidecode=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.dump_path.is_empty() {
        return Err("dump_path must be set in the config".into());
    }

    let dump_path = resolve_path(&cli.config, &config.dump_path);
    let dump: Dump = serde_json::from_str(&fs::read_to_string(&dump_path)?)?;
    let (width, height) = (dump.image_width, dump.image_height);
    tracing::info!(
        regions = dump.regions.len(),
        width,
        height,
        "loaded recorded outputs"
    );

    // The recorded engine never reads pixels; a blank frame stands in when
    // no image is given.
    let image = match &config.image_path {
        Some(path) => load_bgr_image(resolve_path(&cli.config, path))?,
        None => OwnedImage::new(vec![0u8; width * height * 3], width, height)?,
    };

    let detector = Detector::new(RecordedEngine::from(dump), config.detector.into())?;
    let class_names = &detector.config().class_names;

    let view: ImageView<'_> = image.view();
    let detections = detector.detect(view)?;
    let output = Output {
        count: detections.len(),
        detections: detections
            .iter()
            .map(|det| DetectionRecord::new(det, class_names))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(resolve_path(&cli.config, &path), json)?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{resolve_path, Config, Dump, EXAMPLE_JSON};
    use roidecode::RecordedEngine;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn relative_paths_follow_the_config_file() {
        let config = Path::new("configs/run.json");
        assert_eq!(
            resolve_path(config, "dump.json"),
            PathBuf::from("configs/dump.json")
        );
        assert_eq!(
            resolve_path(Path::new("run.json"), "dump.json"),
            PathBuf::from("dump.json")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let abs = std::env::temp_dir().join("dump.json");
        let resolved = resolve_path(Path::new("configs/run.json"), abs.to_str().unwrap());
        assert_eq!(resolved, abs);
    }

    #[test]
    fn example_config_finds_its_dump_from_any_directory() {
        let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.json");
        let config: Config = serde_json::from_str(EXAMPLE_JSON).unwrap();
        let dump_path = resolve_path(&config_path, &config.dump_path);
        let dump: Dump = serde_json::from_str(&fs::read_to_string(dump_path).unwrap()).unwrap();
        let engine = RecordedEngine::from(dump);
        assert_eq!(engine.regions().len(), 5);
    }
}
