#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::ProbeImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inconsistent cube face geometry.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("cube face pixel buffer is not square")]
    NotSquare,
    #[error("cube faces are not uniform in size ({expected} vs {found})")]
    NotUniform { expected: usize, found: usize },
    #[error("expected six cube faces, found {0}")]
    FaceCount(usize),
}

/// One of the six cube map orientations, in GL face order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Index of this face within the GL `TEXTURE_CUBE_MAP_*` sequence.
    pub fn index(self) -> usize {
        match self {
            CubeFace::PositiveX => 0,
            CubeFace::NegativeX => 1,
            CubeFace::PositiveY => 2,
            CubeFace::NegativeY => 3,
            CubeFace::PositiveZ => 4,
            CubeFace::NegativeZ => 5,
        }
    }

    /// Maps intra-face coordinates to a (non-normalized) world direction.
    ///
    /// `u` runs left to right and `v` top to bottom across the face image,
    /// both over [-1, 1], following the GL cube map lookup convention.
    pub fn direction(self, u: f32, v: f32) -> [f32; 3] {
        match self {
            CubeFace::PositiveX => [1.0, -v, -u],
            CubeFace::NegativeX => [-1.0, -v, u],
            CubeFace::PositiveY => [u, 1.0, v],
            CubeFace::NegativeY => [u, -1.0, -v],
            CubeFace::PositiveZ => [u, -v, 1.0],
            CubeFace::NegativeZ => [-u, -v, -1.0],
        }
    }
}

/// A single square cube face image with RGB float samples.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceImage {
    pub face: CubeFace,
    pub size: usize,
    pub pixels: Vec<f32>,
}

impl FaceImage {
    pub fn texel(&self, x: usize, y: usize) -> [f32; 3] {
        assert!(x < self.size && y < self.size);

        let base = (y * self.size + x) * 3;

        [
            self.pixels[base],
            self.pixels[base + 1],
            self.pixels[base + 2],
        ]
    }
}

/// Checks that a face set is complete, square and uniform, returning the
/// common face size.
pub fn validate_faces(faces: &[FaceImage]) -> Result<usize, LayoutError> {
    if faces.len() != 6 {
        return Err(LayoutError::FaceCount(faces.len()));
    }

    let expected = faces[0].size;

    for face in faces {
        if face.pixels.len() != face.size * face.size * 3 {
            return Err(LayoutError::NotSquare);
        }

        if face.size != expected {
            return Err(LayoutError::NotUniform {
                expected,
                found: face.size,
            });
        }
    }

    Ok(expected)
}

/// Reprojects an equirectangular probe into six square cube faces.
///
/// Each output texel's direction is derived from the face basis at the texel
/// center and the source is sampled bilinearly at the corresponding spherical
/// coordinate, so adjacent faces tile seamlessly for smooth inputs.
pub fn reproject(probe: &ProbeImage, face_size: usize) -> Vec<FaceImage> {
    assert!(face_size > 0, "invalid cube face size requested");

    let mut faces = Vec::with_capacity(6);

    for &face in &CubeFace::ALL {
        let mut pixels = Vec::with_capacity(face_size * face_size * 3);

        for y in 0..face_size {
            let v = (2.0 * (y as f32 + 0.5)) / face_size as f32 - 1.0;

            for x in 0..face_size {
                let u = (2.0 * (x as f32 + 0.5)) / face_size as f32 - 1.0;

                let [dx, dy, dz] = face.direction(u, v);
                let norm = (dx * dx + dy * dy + dz * dz).sqrt();

                let sample = probe.sample_direction([dx / norm, dy / norm, dz / norm]);

                pixels.extend_from_slice(&sample);
            }
        }

        faces.push(FaceImage {
            face,
            size: face_size,
            pixels,
        });
    }

    faces
}

/// Picks the cube face resolution for a probe: the largest power of two not
/// exceeding half the source height, capped by the GL cube map size limit.
pub fn face_size_for(probe_height: usize, max_cube_size: usize) -> usize {
    let target = (probe_height / 2).max(1).min(max_cube_size.max(1));

    let mut size = 1;

    while size * 2 <= target {
        size *= 2;
    }

    size
}
