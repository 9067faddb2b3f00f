//! Tag family dictionaries and bit-word decoding.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::codes::{TAG16H5, TAG36H11};

/// Errors raised while building or selecting a dictionary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("dictionary `{0}` has no codes")]
    Empty(String),
    #[error("dictionary grid dimension {0} is not supported (expected 2..=8)")]
    UnsupportedDimension(usize),
    #[error("unknown marker dictionary `{0}`")]
    Unknown(String),
}

/// A tag family: grid size, minimum code distance and code table.
#[derive(Clone, Debug)]
pub struct TagDictionary {
    name: Cow<'static, str>,
    dimension: usize,
    min_distance: u32,
    codes: Cow<'static, [u64]>,
    code_to_id: HashMap<u64, u32>,
}

/// Decoded marker identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedCode {
    pub id: u32,
    /// Number of clockwise quarter turns applied to the observed bits.
    pub rotation: u8,
    pub hamming: u32,
}

impl TagDictionary {
    /// Build a dictionary from a list of code words.
    pub fn from_codes(
        name: impl Into<Cow<'static, str>>,
        dimension: usize,
        min_distance: u32,
        codes: impl Into<Cow<'static, [u64]>>,
    ) -> Result<Self, DictionaryError> {
        let name = name.into();
        let codes = codes.into();
        if !(2..=8).contains(&dimension) {
            return Err(DictionaryError::UnsupportedDimension(dimension));
        }
        if codes.is_empty() {
            return Err(DictionaryError::Empty(name.into_owned()));
        }
        let code_to_id = codes
            .iter()
            .enumerate()
            .map(|(id, &code)| (code, id as u32))
            .collect();
        Ok(Self {
            name,
            dimension,
            min_distance,
            codes,
            code_to_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data cells per side.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn min_distance(&self) -> u32 {
        self.min_distance
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn code(&self, id: u32) -> Option<u64> {
        self.codes.get(id as usize).copied()
    }

    /// Largest hamming correction that still decodes unambiguously.
    pub fn max_correctable(&self) -> u32 {
        self.min_distance.saturating_sub(1) / 2
    }

    /// Match observed bits against the table in all four rotations.
    ///
    /// Returns the closest code within `max_hamming` (clamped to
    /// [`TagDictionary::max_correctable`]).
    pub fn decode(&self, bits: u64, max_hamming: u32) -> Option<DecodedCode> {
        let max_hamming = max_hamming.min(self.max_correctable());
        let bits = bits & self.mask();

        let mut rotated = bits;
        for rotation in 0..4u8 {
            if let Some(&id) = self.code_to_id.get(&rotated) {
                return Some(DecodedCode {
                    id,
                    rotation,
                    hamming: 0,
                });
            }
            rotated = rotate90(rotated, self.dimension);
        }
        if max_hamming == 0 {
            return None;
        }

        let mut best: Option<DecodedCode> = None;
        let mut rotated = bits;
        for rotation in 0..4u8 {
            for (id, &code) in self.codes.iter().enumerate() {
                let hamming = (rotated ^ code).count_ones();
                if hamming <= max_hamming && best.is_none_or(|b| hamming < b.hamming) {
                    best = Some(DecodedCode {
                        id: id as u32,
                        rotation,
                        hamming,
                    });
                }
            }
            rotated = rotate90(rotated, self.dimension);
        }
        best
    }

    fn mask(&self) -> u64 {
        let bits = self.dimension * self.dimension;
        if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
    }
}

/// Rotate a square bit grid 90 degrees clockwise (image coordinates, y down).
pub fn rotate90(bits: u64, dim: usize) -> u64 {
    let mut res = 0u64;
    for y in 0..dim {
        for x in 0..dim {
            if (bits >> (y * dim + x)) & 1 != 0 {
                let nx = dim - 1 - y;
                let ny = x;
                res |= 1 << (ny * dim + nx);
            }
        }
    }
    res
}

static APRILTAG_36H11: LazyLock<TagDictionary> = LazyLock::new(|| TagDictionary {
    name: Cow::Borrowed("DICT_APRILTAG_36h11"),
    dimension: 6,
    min_distance: 11,
    codes: Cow::Borrowed(&TAG36H11),
    code_to_id: index_codes(&TAG36H11),
});

static APRILTAG_16H5: LazyLock<TagDictionary> = LazyLock::new(|| TagDictionary {
    name: Cow::Borrowed("DICT_APRILTAG_16h5"),
    dimension: 4,
    min_distance: 5,
    codes: Cow::Borrowed(&TAG16H5),
    code_to_id: index_codes(&TAG16H5),
});

fn index_codes(codes: &[u64]) -> HashMap<u64, u32> {
    codes
        .iter()
        .enumerate()
        .map(|(id, &code)| (code, id as u32))
        .collect()
}

/// Built-in marker dictionaries, selected by their conventional names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerDictionary {
    #[default]
    #[serde(rename = "DICT_APRILTAG_36h11")]
    AprilTag36h11,
    #[serde(rename = "DICT_APRILTAG_16h5")]
    AprilTag16h5,
}

impl MarkerDictionary {
    pub const ALL: [MarkerDictionary; 2] = [Self::AprilTag36h11, Self::AprilTag16h5];

    pub fn name(self) -> &'static str {
        match self {
            Self::AprilTag36h11 => "DICT_APRILTAG_36h11",
            Self::AprilTag16h5 => "DICT_APRILTAG_16h5",
        }
    }

    pub fn dictionary(self) -> &'static TagDictionary {
        match self {
            Self::AprilTag36h11 => &APRILTAG_36H11,
            Self::AprilTag16h5 => &APRILTAG_16H5,
        }
    }
}

impl fmt::Display for MarkerDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarkerDictionary {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DictionaryError::Unknown(s.to_string()))
    }
}
