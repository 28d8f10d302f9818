use roidecode::{
    DetectionEngine, Detector, DetectorConfig, ImInfo, ImageView, OwnedImage, RecordedEngine,
    Rect, RoiDecodeError,
};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 12];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        RoiDecodeError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        RoiDecodeError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [0u8; 24];

    let err = ImageView::new(&data, 4, 1, 11).err().unwrap();
    assert_eq!(
        err,
        RoiDecodeError::InvalidStride {
            row_len: 12,
            stride: 11,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u8; 11];

    let err = ImageView::new(&data, 2, 2, 6).err().unwrap();
    assert_eq!(err, RoiDecodeError::BufferTooSmall { needed: 12, got: 11 });
}

#[test]
fn image_view_reads_bgr_pixels_with_padding() {
    // 2x2 image, stride 8 leaves two padding bytes per row.
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::new(&data, 2, 2, 8).unwrap();
    assert_eq!(view.pixel(0, 0), Some([0, 1, 2]));
    assert_eq!(view.pixel(1, 1), Some([11, 12, 13]));
    assert_eq!(view.pixel(2, 0), None);
    assert_eq!(view.row(1).unwrap(), &[8u8, 9, 10, 11, 12, 13]);
}

#[test]
fn owned_image_requires_exact_length() {
    assert!(OwnedImage::new(vec![0u8; 12], 2, 2).is_ok());
    assert_eq!(
        OwnedImage::new(vec![0u8; 13], 2, 2).err().unwrap(),
        RoiDecodeError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );
}

#[test]
fn owned_image_rejects_overflowing_width() {
    assert_eq!(
        OwnedImage::new(Vec::new(), usize::MAX, 1).err().unwrap(),
        RoiDecodeError::InvalidDimensions {
            width: usize::MAX,
            height: 1,
        }
    );
}

#[test]
fn im_info_matches_short_side_resize() {
    let info = ImInfo::for_target_size(500, 375, 224).unwrap();
    assert_eq!(info.resized_height, 224.0);
    assert!((info.scale - 224.0 / 375.0).abs() < 1e-6);
    assert!((info.resized_width - 500.0 * 224.0 / 375.0).abs() < 1e-3);

    assert_eq!(
        ImInfo::for_target_size(10, 10, 0).err().unwrap(),
        RoiDecodeError::InvalidCount {
            name: "target_size",
            value: 0,
        }
    );
}

#[test]
fn iou_is_symmetric_and_one_for_identical_boxes() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(1.0, 1.0, 10.0, 10.0);
    assert_eq!(a.iou(&b), b.iou(&a));
    assert!((a.iou(&b) - 81.0 / 119.0).abs() < 1e-6);
    assert_eq!(a.iou(&a), 1.0);
}

#[test]
fn detector_rejects_class_count_mismatch() {
    let engine = RecordedEngine::new(8, 8, 3);
    assert_eq!(engine.num_classes(), 3);
    let err = Detector::new(engine, DetectorConfig::default()).err().unwrap();
    assert_eq!(
        err,
        RoiDecodeError::ClassCountMismatch {
            expected: 3,
            got: 21,
        }
    );
}

#[test]
fn detector_rejects_invalid_thresholds_before_running() {
    let engine = RecordedEngine::new(8, 8, 21);
    let cfg = DetectorConfig {
        nms_threshold: 1.5,
        ..DetectorConfig::default()
    };
    let err = Detector::new(engine, cfg).err().unwrap();
    assert_eq!(
        err,
        RoiDecodeError::InvalidThreshold {
            name: "nms_threshold",
            value: 1.5,
        }
    );
}
