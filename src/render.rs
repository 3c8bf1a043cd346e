//! Conversion to the rendering layer's 4x4 transform form
//!
//! The rendering layer consumes CSS-style `matrix3d(...)` transform strings,
//! which carry a 4x4 homogeneous matrix in column-major order. A 2D
//! homography embeds into that form by placing its linear block and
//! translation in the affine cells and its two perspective coefficients in
//! the fourth row, where the renderer reads the perspective-divide inputs
//! for the x and y axes. The z row stays identity. Getting this placement
//! wrong flips the transform, so it is pinned down by tests rather than
//! left to the call site.

use serde::Serialize;
use thiserror::Error;

use crate::homography::ProjectiveMatrix;

/// The matrix contains NaN or infinite entries and cannot be handed to the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("render matrix has non-finite entries")]
pub struct NonFiniteMatrixError;

/// A 4x4 homogeneous transform in column-major order, as the rendering
/// layer expects it
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RenderMatrix([f64; 16]);

impl RenderMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Embed a 3x3 homography `[[a,b,c],[d,e,f],[g,h,1]]` as
    ///
    /// ```text
    /// a  b  0  c
    /// d  e  0  f
    /// 0  0  1  0
    /// g  h  0  1
    /// ```
    ///
    /// flattened column-major.
    pub fn from_projective(p: &ProjectiveMatrix) -> Self {
        let m = p.entries();
        Self([
            m[0], m[3], 0.0, m[6], //
            m[1], m[4], 0.0, m[7], //
            0.0, 0.0, 1.0, 0.0, //
            m[2], m[5], 0.0, m[8],
        ])
    }

    /// The column-major values `v0..v15`
    pub fn values(&self) -> &[f64; 16] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Serialize as a `matrix3d(v0, v1, ..., v15)` transform descriptor.
    ///
    /// Values keep the platform's native float precision; coordinates are
    /// already canvas pixels, so there is no unit conversion. A matrix with
    /// non-finite entries fails instead of producing a string the renderer
    /// would choke on.
    pub fn to_transform_string(&self) -> Result<String, NonFiniteMatrixError> {
        if !self.is_finite() {
            return Err(NonFiniteMatrixError);
        }

        let values = self
            .0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("matrix3d({})", values))
    }
}
