// Copyright 2026 the loam developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a 4x4 matrix type for 3D transformations and projections.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::{Quaternion, Vec3, Vec4};
use std::ops::{Add, Mul};

/// A 4x4 matrix of `f32`, stored as a flat 16-element array.
///
/// The storage is row-major: entry `(row, col)` lives at `data[row * 4 + col]`,
/// and `Mat4 * Mat4` multiplies with that layout. The matrix-vector product is
/// the historical exception: `Mat4 * Vec4` reads the storage **column-wise**
/// (`x' = d[0]x + d[4]y + d[8]z + d[12]w`), which
/// is equivalent to applying the transpose. For a rotation matrix this applies
/// the inverse rotation compared with applying the rows. This asymmetry is
/// load-bearing for the GPU upload path and is kept deliberately; see
/// [`Mat4::row`] for the row-wise alternative.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Mat4 {
    /// The matrix entries, row-major: `data[row * 4 + col]`.
    pub data: [f32; 16],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// The all-zeroes matrix.
    pub const ZERO: Self = Self { data: [0.0; 16] };

    /// Creates a matrix from 16 values in row-major order.
    #[inline]
    pub const fn from_row_major(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Creates a matrix from four row vectors.
    #[inline]
    pub const fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self {
            data: [
                r0.x, r0.y, r0.z, r0.w, //
                r1.x, r1.y, r1.z, r1.w, //
                r2.x, r2.y, r2.z, r2.w, //
                r3.x, r3.y, r3.z, r3.w,
            ],
        }
    }

    /// Returns the entry at `(row, col)`. Both indices must be in `0..4`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * 4 + col]
    }

    /// Sets the entry at `(row, col)`. Both indices must be in `0..4`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * 4 + col] = value;
    }

    /// Returns row `row` as a [`Vec4`].
    #[inline]
    pub fn row(&self, row: usize) -> Vec4 {
        let base = row * 4;
        Vec4::new(
            self.data[base],
            self.data[base + 1],
            self.data[base + 2],
            self.data[base + 3],
        )
    }

    /// Returns column `col` as a [`Vec4`].
    #[inline]
    pub fn col(&self, col: usize) -> Vec4 {
        Vec4::new(
            self.data[col],
            self.data[col + 4],
            self.data[col + 8],
            self.data[col + 12],
        )
    }

    /// Returns the raw 16 floats, row-major. Suitable for a uniform upload.
    #[inline]
    pub const fn to_array(&self) -> [f32; 16] {
        self.data
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let d = &self.data;
        Self::from_row_major([
            d[0], d[4], d[8], d[12], //
            d[1], d[5], d[9], d[13], //
            d[2], d[6], d[10], d[14], //
            d[3], d[7], d[11], d[15],
        ])
    }

    /// Computes the determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let d = &self.data;
        let mut det = 0.0;

        det += d[0]
            * (d[5] * (d[10] * d[15] - d[11] * d[14]) - d[6] * (d[9] * d[15] - d[11] * d[13])
                + d[7] * (d[9] * d[14] - d[10] * d[13]));
        det -= d[1]
            * (d[4] * (d[10] * d[15] - d[11] * d[14]) - d[6] * (d[8] * d[15] - d[11] * d[12])
                + d[7] * (d[8] * d[14] - d[10] * d[12]));
        det += d[2]
            * (d[4] * (d[9] * d[15] - d[11] * d[13]) - d[5] * (d[8] * d[15] - d[11] * d[12])
                + d[7] * (d[8] * d[13] - d[9] * d[12]));
        det -= d[3]
            * (d[4] * (d[9] * d[14] - d[10] * d[13]) - d[5] * (d[8] * d[14] - d[10] * d[12])
                + d[6] * (d[8] * d[13] - d[9] * d[12]));

        det
    }

    /// Computes the cofactor matrix (each entry replaced by its signed minor).
    pub fn cofactor(&self) -> Self {
        let d = &self.data;
        let mut result = Self::ZERO;

        result.data[0] = d[5] * (d[10] * d[15] - d[11] * d[14])
            - d[6] * (d[9] * d[15] - d[11] * d[13])
            + d[7] * (d[9] * d[14] - d[10] * d[13]);
        result.data[1] = -(d[4] * (d[10] * d[15] - d[11] * d[14])
            - d[6] * (d[8] * d[15] - d[11] * d[12])
            + d[7] * (d[8] * d[14] - d[10] * d[12]));
        result.data[2] = d[4] * (d[9] * d[15] - d[11] * d[13])
            - d[5] * (d[8] * d[15] - d[11] * d[12])
            + d[7] * (d[8] * d[13] - d[9] * d[12]);
        result.data[3] = -(d[4] * (d[9] * d[14] - d[10] * d[13])
            - d[5] * (d[8] * d[14] - d[10] * d[12])
            + d[6] * (d[8] * d[13] - d[9] * d[12]));

        result.data[4] = -(d[1] * (d[10] * d[15] - d[11] * d[14])
            - d[2] * (d[9] * d[15] - d[11] * d[13])
            + d[3] * (d[9] * d[14] - d[10] * d[13]));
        result.data[5] = d[0] * (d[10] * d[15] - d[11] * d[14])
            - d[2] * (d[8] * d[15] - d[11] * d[12])
            + d[3] * (d[8] * d[14] - d[10] * d[12]);
        result.data[6] = -(d[0] * (d[9] * d[15] - d[11] * d[13])
            - d[1] * (d[8] * d[15] - d[11] * d[12])
            + d[3] * (d[8] * d[13] - d[9] * d[12]));
        result.data[7] = d[0] * (d[9] * d[14] - d[10] * d[13])
            - d[1] * (d[8] * d[14] - d[10] * d[12])
            + d[2] * (d[8] * d[13] - d[9] * d[12]);

        result.data[8] = d[1] * (d[6] * d[15] - d[7] * d[14])
            - d[2] * (d[5] * d[15] - d[7] * d[13])
            + d[3] * (d[5] * d[14] - d[6] * d[13]);
        result.data[9] = -(d[0] * (d[6] * d[15] - d[7] * d[14])
            - d[2] * (d[4] * d[15] - d[7] * d[12])
            + d[3] * (d[4] * d[14] - d[6] * d[12]));
        result.data[10] = d[0] * (d[5] * d[15] - d[7] * d[13])
            - d[1] * (d[4] * d[15] - d[7] * d[12])
            + d[3] * (d[4] * d[13] - d[5] * d[12]);
        result.data[11] = -(d[0] * (d[5] * d[14] - d[6] * d[13])
            - d[1] * (d[4] * d[14] - d[6] * d[12])
            + d[2] * (d[4] * d[13] - d[5] * d[12]));

        result.data[12] = -(d[1] * (d[6] * d[11] - d[7] * d[10])
            - d[2] * (d[5] * d[11] - d[7] * d[9])
            + d[3] * (d[5] * d[10] - d[6] * d[9]));
        result.data[13] = d[0] * (d[6] * d[11] - d[7] * d[10])
            - d[2] * (d[4] * d[11] - d[7] * d[8])
            + d[3] * (d[4] * d[10] - d[6] * d[8]);
        result.data[14] = -(d[0] * (d[5] * d[11] - d[7] * d[9])
            - d[1] * (d[4] * d[11] - d[7] * d[8])
            + d[3] * (d[4] * d[9] - d[5] * d[8]));
        result.data[15] = d[0] * (d[5] * d[10] - d[6] * d[9])
            - d[1] * (d[4] * d[10] - d[6] * d[8])
            + d[2] * (d[4] * d[9] - d[5] * d[8]);

        result
    }

    /// Computes the inverse via the adjugate (transposed cofactor) matrix.
    ///
    /// Returns `None` when the determinant is exactly zero. Near-singular
    /// matrices still invert; numerical conditioning is the caller's concern.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();

        if det == 0.0 {
            return None;
        }

        let adjugate = self.cofactor().transpose();
        let mut result = Self::ZERO;
        for i in 0..16 {
            result.data[i] = adjugate.data[i] / det;
        }
        Some(result)
    }

    /// Adds `translation` into the translation entries (`data[12..15]`).
    #[inline]
    pub fn apply_translation(&mut self, translation: Vec3) {
        self.data[12] += translation.x;
        self.data[13] += translation.y;
        self.data[14] += translation.z;
    }

    /// Left-multiplies this matrix by the rotation matrix of `rotation`.
    ///
    /// Intended build order for a model matrix is scale, then rotate, then
    /// translate; calling this after [`Mat4::apply_translation`] rotates the
    /// translation too.
    #[inline]
    pub fn apply_rotation(&mut self, rotation: Quaternion) {
        *self = rotation.to_mat4() * *self;
    }

    /// Multiplies the diagonal scale entries by `scale` component-wise.
    ///
    /// Only `data[0]`, `data[5]` and `data[10]` are touched, so this is only
    /// a true scale if no rotation has been applied yet.
    #[inline]
    pub fn apply_scale(&mut self, scale: Vec3) {
        self.data[0] *= scale.x;
        self.data[5] *= scale.y;
        self.data[10] *= scale.z;
    }

    /// Builds an orthographic projection matrix for the given clip volume.
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut result = Self::IDENTITY;

        result.data[0] = 2.0 / (right - left);
        result.data[5] = 2.0 / (top - bottom);
        result.data[10] = -2.0 / (far - near);
        result.data[12] = -(right + left) / (right - left);
        result.data[13] = -(top + bottom) / (top - bottom);
        result.data[14] = -(far + near) / (far - near);

        result
    }

    /// Builds a perspective projection matrix.
    ///
    /// `fov_y_radians` is the full vertical field of view and `aspect` is
    /// width over height. `near` and `far` are the positive clip distances.
    pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let s = 1.0 / (fov_y_radians / 2.0).tan();

        let mut result = Self::IDENTITY;

        result.data[0] = s / aspect;
        result.data[5] = s;
        result.data[10] = -far / (far - near);
        result.data[14] = -(far * near) / (far - near);

        result.data[11] = -1.0;
        result.data[15] = 0.0;

        result
    }
}

// --- Operator Overloads ---

impl Default for Mat4 {
    /// Returns the identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Mat4 {
    type Output = Self;
    /// Adds two matrices entry-wise.
    fn add(self, rhs: Self) -> Self::Output {
        let mut result = Self::ZERO;
        for i in 0..16 {
            result.data[i] = self.data[i] + rhs.data[i];
        }
        result
    }
}

impl Mul for Mat4 {
    type Output = Self;
    /// Multiplies two matrices with row-major indexing:
    /// `out[i][j] = Σ_k self[i][k] * rhs[k][j]`.
    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                result.data[i * 4 + j] = self.data[i * 4] * rhs.data[j]
                    + self.data[i * 4 + 1] * rhs.data[j + 4]
                    + self.data[i * 4 + 2] * rhs.data[j + 8]
                    + self.data[i * 4 + 3] * rhs.data[j + 12];
            }
        }
        result
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a [`Vec4`] by reading the storage column-wise:
    /// `x' = d[0]x + d[4]y + d[8]z + d[12]w`, and so on.
    ///
    /// With row-major storage this is the transpose application; see the
    /// type-level docs for why it is kept.
    fn mul(self, rhs: Vec4) -> Self::Output {
        let d = &self.data;
        Vec4::new(
            d[0] * rhs.x + d[4] * rhs.y + d[8] * rhs.z + d[12] * rhs.w,
            d[1] * rhs.x + d[5] * rhs.y + d[9] * rhs.z + d[13] * rhs.w,
            d[2] * rhs.x + d[6] * rhs.y + d[10] * rhs.z + d[14] * rhs.w,
            d[3] * rhs.x + d[7] * rhs.y + d[11] * rhs.z + d[15] * rhs.w,
        )
    }
}
