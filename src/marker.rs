mod codes;
mod detector;
mod dictionary;
mod homography;
mod quad;
mod render;

pub use detector::{AprilTagDetector, DetectError, DetectorParams, MarkerDetection, MarkerDetector, MarkerScan};
pub use dictionary::{DecodedCode, DictionaryError, MarkerDictionary, TagDictionary, rotate90};
pub use homography::Homography;
pub use render::render_marker;
