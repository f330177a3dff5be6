//! Tests for reducing raw detections to feature midpoints


use face_follow::features::{reduce, FeatureMidpoints, Point, RawDetection};
use proptest::prelude::*;
use test_helpers::detection_with_moves;

fn blazeface_sample() -> RawDetection {
    RawDetection {
        top_left: Point::new(232.28, 145.26),
        bottom_right: Point::new(449.75, 308.36),
        probability: vec![0.998],
        landmarks: vec![
            Point::new(295.13, 177.64),
            Point::new(382.32, 175.56),
            Point::new(341.18, 205.03),
            Point::new(345.12, 250.61),
            Point::new(252.76, 211.37),
            Point::new(431.20, 204.93),
        ],
    }
}

#[test]
fn test_face_is_bounding_box_center() {
    let features = reduce(&blazeface_sample());
    assert!((features.face.x - 341.015).abs() < 1e-9);
    assert!((features.face.y - 226.81).abs() < 1e-9);
}

#[test]
fn test_reduce_is_deterministic() {
    let detection = blazeface_sample();
    assert_eq!(reduce(&detection), reduce(&detection));
    assert_eq!(FeatureMidpoints::from(&detection), reduce(&detection));
}

#[test]
fn test_nose_and_mouth_do_not_matter() {
    let detection = blazeface_sample();
    let mut shuffled = detection.clone();
    shuffled.landmarks.swap(2, 3);
    shuffled.landmarks[2] = Point::new(-1000.0, 5000.0);

    assert_eq!(reduce(&detection), reduce(&shuffled));
}

#[test]
fn test_eye_and_ear_order_is_irrelevant() {
    let detection = blazeface_sample();
    let mut swapped = detection.clone();
    swapped.landmarks.swap(0, 1);
    swapped.landmarks.swap(4, 5);

    let a = reduce(&detection);
    let b = reduce(&swapped);
    assert_eq!(a.eyes, b.eyes);
    assert_eq!(a.ears, b.ears);
}

#[test]
fn test_helper_offsets() {
    let features = reduce(&detection_with_moves(40.0, 12.0, 0.999));
    assert_eq!(features.face.x - features.eyes.x, 40.0);
    assert_eq!(features.eyes.y - features.ears.y, 12.0);
}

#[test]
#[should_panic]
fn test_short_landmarks_panic() {
    let mut detection = blazeface_sample();
    detection.landmarks.truncate(3);
    let _ = reduce(&detection);
}

fn point() -> impl Strategy<Value = Point> {
    (-1000.0..1000.0f64, -1000.0..1000.0f64).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn prop_reduce_averages_selected_points(
        top_left in point(),
        bottom_right in point(),
        landmarks in prop::collection::vec(point(), 6)
    ) {
        let detection = RawDetection {
            top_left,
            bottom_right,
            probability: vec![0.999],
            landmarks: landmarks.clone(),
        };
        let features = reduce(&detection);

        prop_assert_eq!(features.face.x, (top_left.x + bottom_right.x) * 0.5);
        prop_assert_eq!(features.face.y, (top_left.y + bottom_right.y) * 0.5);
        prop_assert_eq!(features.eyes.x, (landmarks[1].x + landmarks[0].x) * 0.5);
        prop_assert_eq!(features.eyes.y, (landmarks[1].y + landmarks[0].y) * 0.5);
        prop_assert_eq!(features.ears.x, (landmarks[5].x + landmarks[4].x) * 0.5);
        prop_assert_eq!(features.ears.y, (landmarks[5].y + landmarks[4].y) * 0.5);
    }
}
