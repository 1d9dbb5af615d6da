//! Ragged per-residue feature sequences.
//!
//! A [`Sequence`] is an ordered list of fixed-width `f32` feature rows, one
//! row per residue. Source sequences carry the amino-acid encoding
//! ([`AA_ENCODING_DIM`] values per row); target sequences carry the angle
//! encoding ([`ANGLE_ENCODING_DIM`] values per row). Conversion to a candle
//! [`Tensor`] happens at the batch-construction boundary.
use candle_core::{bail, Device, Result, Tensor};

/// Row width of the amino-acid encoding on the source side.
pub const AA_ENCODING_DIM: usize = 20;

/// Row width of the angle encoding on the target side.
pub const ANGLE_ENCODING_DIM: usize = 22;

/// One protein's per-residue feature rows, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    data: Vec<f32>,
    width: usize,
}

impl Sequence {
    /// Build a sequence from individual feature rows.
    ///
    /// Every row must have exactly `width` values.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R], width: usize) -> Result<Self> {
        if width == 0 {
            bail!("row width must be non-zero");
        }
        let mut data = Vec::with_capacity(rows.len() * width);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                bail!("row {} has width {}, expected {}", idx, row.len(), width);
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, width })
    }

    /// Build a sequence from a flat row-major buffer of `len * width` values.
    pub fn from_vec(data: Vec<f32>, len: usize, width: usize) -> Result<Self> {
        if width == 0 {
            bail!("row width must be non-zero");
        }
        if data.len() != len * width {
            bail!(
                "buffer of {} values cannot hold {} rows of width {}",
                data.len(),
                len,
                width
            );
        }
        Ok(Self { data, width })
    }

    /// Number of residues (rows).
    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Feature dimension of each row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The feature row at `idx`.
    pub fn row(&self, idx: usize) -> &[f32] {
        &self.data[idx * self.width..(idx + 1) * self.width]
    }

    /// Iterate over feature rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.width)
    }

    /// The raw row-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Convert to a `(len, width)` tensor of F32.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        Tensor::from_slice(&self.data, (self.len(), self.width), device)
    }
}

impl AsRef<Sequence> for Sequence {
    fn as_ref(&self) -> &Sequence {
        self
    }
}
