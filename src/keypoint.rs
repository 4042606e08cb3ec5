// PoseMatch 🕺 MIT License

//! Skeleton and keypoint data model.
//!
//! A [`Skeleton`] is one pose-detection result: a named, scored set of 2D
//! keypoints in image pixel coordinates. Keypoint order within a skeleton is
//! detector-assigned and irrelevant; all lookups go by [`KeypointName`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named body landmarks, following the COCO-17 keypoint convention.
///
/// The discriminant order matches the COCO keypoint index, so
/// `KeypointName::ALL[i]` is the landmark a pose model emits at row `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    /// Nose tip.
    Nose,
    /// Left eye.
    LeftEye,
    /// Right eye.
    RightEye,
    /// Left ear.
    LeftEar,
    /// Right ear.
    RightEar,
    /// Left shoulder.
    LeftShoulder,
    /// Right shoulder.
    RightShoulder,
    /// Left elbow.
    LeftElbow,
    /// Right elbow.
    RightElbow,
    /// Left wrist.
    LeftWrist,
    /// Right wrist.
    RightWrist,
    /// Left hip.
    LeftHip,
    /// Right hip.
    RightHip,
    /// Left knee.
    LeftKnee,
    /// Right knee.
    RightKnee,
    /// Left ankle.
    LeftAnkle,
    /// Right ankle.
    RightAnkle,
}

impl KeypointName {
    /// All landmarks in COCO index order.
    pub const ALL: [Self; 17] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Returns the canonical snake_case string form emitted by detectors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Returns the COCO keypoint index of this landmark.
    #[must_use]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|n| n == self).unwrap_or(0)
    }
}

impl fmt::Display for KeypointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KeypointName {
    type Err = KeypointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|n| n.as_str() == s)
            .copied()
            .ok_or_else(|| KeypointParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown landmark name.
#[derive(Debug, Clone)]
pub struct KeypointParseError(String);

impl fmt::Display for KeypointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keypoint name '{}'", self.0)
    }
}

impl std::error::Error for KeypointParseError {}

/// The 13 landmarks compared when scoring pose similarity.
///
/// Eyes and ears are excluded from scoring; they still appear in
/// [`SKELETON_EDGES`] for overlay drawing.
pub const SCORED_KEYPOINTS: [KeypointName; 13] = [
    KeypointName::Nose,
    KeypointName::LeftShoulder,
    KeypointName::RightShoulder,
    KeypointName::LeftElbow,
    KeypointName::RightElbow,
    KeypointName::LeftWrist,
    KeypointName::RightWrist,
    KeypointName::LeftHip,
    KeypointName::RightHip,
    KeypointName::LeftKnee,
    KeypointName::RightKnee,
    KeypointName::LeftAnkle,
    KeypointName::RightAnkle,
];

/// Limb connections used to draw a skeleton overlay.
pub const SKELETON_EDGES: [(KeypointName, KeypointName); 16] = [
    (KeypointName::Nose, KeypointName::LeftEye),
    (KeypointName::Nose, KeypointName::RightEye),
    (KeypointName::LeftEye, KeypointName::LeftEar),
    (KeypointName::RightEye, KeypointName::RightEar),
    (KeypointName::LeftShoulder, KeypointName::RightShoulder),
    (KeypointName::LeftShoulder, KeypointName::LeftElbow),
    (KeypointName::RightShoulder, KeypointName::RightElbow),
    (KeypointName::LeftElbow, KeypointName::LeftWrist),
    (KeypointName::RightElbow, KeypointName::RightWrist),
    (KeypointName::LeftShoulder, KeypointName::LeftHip),
    (KeypointName::RightShoulder, KeypointName::RightHip),
    (KeypointName::LeftHip, KeypointName::RightHip),
    (KeypointName::LeftHip, KeypointName::LeftKnee),
    (KeypointName::RightHip, KeypointName::RightKnee),
    (KeypointName::LeftKnee, KeypointName::LeftAnkle),
    (KeypointName::RightKnee, KeypointName::RightAnkle),
];

/// One detected or reference anatomical landmark.
///
/// Coordinates are image pixels; `score` is the detector's confidence in
/// `[0, 1]`. Immutable once produced by a detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Landmark identity.
    pub name: KeypointName,
    /// X position in pixels.
    pub x: f32,
    /// Y position in pixels.
    pub y: f32,
    /// Detection confidence (0.0 to 1.0).
    pub score: f32,
}

impl Keypoint {
    /// Create a new keypoint.
    #[must_use]
    pub const fn new(name: KeypointName, x: f32, y: f32, score: f32) -> Self {
        Self { name, x, y, score }
    }

    /// Euclidean pixel distance to another keypoint.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

/// One pose-detection result: an ordered sequence of named keypoints.
///
/// At most one keypoint per name is a detector contract, not enforced here;
/// [`Skeleton::get`] returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skeleton {
    keypoints: Vec<Keypoint>,
}

impl Skeleton {
    /// Create a skeleton from detector output.
    #[must_use]
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self { keypoints }
    }

    /// Look up a keypoint by landmark name.
    #[must_use]
    pub fn get(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.name == name)
    }

    /// Number of keypoints in this skeleton.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    /// Check if the skeleton carries no keypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Iterate over all keypoints in detector order.
    pub fn iter(&self) -> impl Iterator<Item = &Keypoint> {
        self.keypoints.iter()
    }
}

impl From<Vec<Keypoint>> for Skeleton {
    fn from(keypoints: Vec<Keypoint>) -> Self {
        Self::new(keypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_name_roundtrip() {
        for name in KeypointName::ALL {
            assert_eq!(name.as_str().parse::<KeypointName>().unwrap(), name);
        }
        assert!("left_kneecap".parse::<KeypointName>().is_err());
    }

    #[test]
    fn test_name_display() {
        assert_eq!(KeypointName::Nose.to_string(), "nose");
        assert_eq!(KeypointName::LeftShoulder.to_string(), "left_shoulder");
        assert_eq!(KeypointName::RightAnkle.to_string(), "right_ankle");
    }

    #[test]
    fn test_coco_index_order() {
        assert_eq!(KeypointName::Nose.index(), 0);
        assert_eq!(KeypointName::LeftShoulder.index(), 5);
        assert_eq!(KeypointName::RightAnkle.index(), 16);
    }

    #[test]
    fn test_scored_set_excludes_face_detail() {
        assert_eq!(SCORED_KEYPOINTS.len(), 13);
        assert!(!SCORED_KEYPOINTS.contains(&KeypointName::LeftEye));
        assert!(!SCORED_KEYPOINTS.contains(&KeypointName::RightEar));
        assert!(SCORED_KEYPOINTS.contains(&KeypointName::Nose));
    }

    #[test]
    fn test_keypoint_distance() {
        let a = Keypoint::new(KeypointName::Nose, 0.0, 0.0, 1.0);
        let b = Keypoint::new(KeypointName::Nose, 3.0, 4.0, 1.0);
        assert_approx_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_skeleton_lookup() {
        let skeleton = Skeleton::new(vec![
            Keypoint::new(KeypointName::Nose, 100.0, 50.0, 0.9),
            Keypoint::new(KeypointName::LeftShoulder, 80.0, 120.0, 0.8),
        ]);
        assert_eq!(skeleton.len(), 2);
        assert!(skeleton.get(KeypointName::Nose).is_some());
        assert!(skeleton.get(KeypointName::RightAnkle).is_none());
    }

    #[test]
    fn test_skeleton_json_shape() {
        let skeleton = Skeleton::new(vec![Keypoint::new(KeypointName::Nose, 1.0, 2.0, 0.5)]);
        let json = serde_json::to_string(&skeleton).unwrap();
        assert_eq!(json, r#"[{"name":"nose","x":1.0,"y":2.0,"score":0.5}]"#);
        let back: Skeleton = serde_json::from_str(&json).unwrap();
        assert_eq!(back, skeleton);
    }
}
