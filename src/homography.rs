//! Planar projective transforms between overlay quads
//!
//! This module computes the 3x3 homography that maps an overlay box's
//! original axis-aligned rectangle onto the quadrilateral the user dragged
//! the corner handles to. The solve is a fixed-size 8x8 linear system, so it
//! is cheap enough to run on every pointer-move event.

use thiserror::Error;

use crate::geometry::Quad;

/// A pivot or determinant below this magnitude means the quad has collapsed
/// (three or more corners collinear) and no unique homography exists.
const SINGULARITY_EPS: f64 = 1e-9;

/// The corner points do not span a quadrilateral, so no unique projective
/// transform maps onto them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("degenerate quad: three or more corners are collinear")]
pub struct DegenerateQuadError;

/// A 3x3 projective transform, stored row-major and normalized so the
/// bottom-right entry is 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectiveMatrix([f64; 9]);

impl ProjectiveMatrix {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// The row-major entries `[a, b, c, d, e, f, g, h, 1]`
    pub fn entries(&self) -> &[f64; 9] {
        &self.0
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Apply the transform to a point, including the perspective divide
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.0;
        let w = m[6] * x + m[7] * y + m[8];
        if w.abs() < SINGULARITY_EPS {
            return (x, y); // Avoid division by zero
        }
        let xp = (m[0] * x + m[1] * y + m[2]) / w;
        let yp = (m[3] * x + m[4] * y + m[5]) / w;
        (xp, yp)
    }
}

/// Compute the homography mapping `source` onto `destination`
/// using the Direct Linear Transform (DLT) algorithm.
///
/// Equal quads short-circuit to the exact identity matrix. A degenerate
/// destination or source quad yields [`DegenerateQuadError`]; the result is
/// never a matrix with non-finite entries.
pub fn solve(source: &Quad, destination: &Quad) -> Result<ProjectiveMatrix, DegenerateQuadError> {
    if source == destination {
        return Ok(ProjectiveMatrix::IDENTITY);
    }

    // Each correspondence (x,y) -> (x',y') contributes two rows in the
    // unknowns a..h (the bottom-right entry is fixed at 1):
    // a*x + b*y + c - x'*x*g - x'*y*h = x'
    // d*x + e*y + f - y'*x*g - y'*y*h = y'
    let mut a = [[0.0f64; 8]; 8];
    let mut b = [0.0f64; 8];

    for i in 0..4 {
        let s = source.points[i];
        let d = destination.points[i];

        let row1 = i * 2;
        let row2 = i * 2 + 1;

        a[row1][0] = s.x;
        a[row1][1] = s.y;
        a[row1][2] = 1.0;
        a[row1][6] = -d.x * s.x;
        a[row1][7] = -d.x * s.y;
        b[row1] = d.x;

        a[row2][3] = s.x;
        a[row2][4] = s.y;
        a[row2][5] = 1.0;
        a[row2][6] = -d.y * s.x;
        a[row2][7] = -d.y * s.y;
        b[row2] = d.y;
    }

    let h = solve_linear_system(&mut a, &mut b).ok_or(DegenerateQuadError)?;

    let matrix = ProjectiveMatrix([h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0]);

    // A solvable system can still produce a rank-deficient transform when
    // the destination corners are collinear; reject those as well.
    if !matrix.is_finite() || matrix.determinant().abs() < SINGULARITY_EPS {
        return Err(DegenerateQuadError);
    }

    Ok(matrix)
}

/// Solve an 8x8 linear system using Gaussian elimination with partial
/// pivoting. Pivoting matters here: axis-aligned source rectangles put
/// zeros on the diagonal in the naive row order.
fn solve_linear_system(a: &mut [[f64; 8]; 8], b: &mut [f64; 8]) -> Option<[f64; 8]> {
    let n = 8;

    // Forward elimination
    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = a[col][col].abs();
        for row in (col + 1)..n {
            if a[row][col].abs() > max_val {
                max_val = a[row][col].abs();
                max_row = row;
            }
        }

        if max_row != col {
            a.swap(col, max_row);
            b.swap(col, max_row);
        }

        let pivot = a[col][col];
        if pivot.abs() < SINGULARITY_EPS {
            return None;
        }

        for row in (col + 1)..n {
            let factor = a[row][col] / pivot;
            for j in col..n {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}
