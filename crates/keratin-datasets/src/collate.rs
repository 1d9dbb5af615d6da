//! Batch collation: ragged sequences to padded tensors plus position indices.
use crate::{Sequence, AA_ENCODING_DIM, ANGLE_ENCODING_DIM};
use candle_core::{bail, Device, Result, Tensor};

/// Pad a batch of ragged sequences to the longest member.
///
/// Returns a `(B, max_len, pad_dim)` F32 tensor of right-zero-padded rows and
/// a `(B, max_len)` I64 position tensor. Positions are 1-based for rows with
/// at least one non-zero value and 0 otherwise, so padding rows read as 0.
/// An all-zero row inside a real sequence also reads as 0 and is
/// indistinguishable from padding.
pub fn collate_fn<S: AsRef<Sequence>>(
    insts: &[S],
    pad_dim: usize,
    device: &Device,
) -> Result<(Tensor, Tensor)> {
    if insts.is_empty() {
        bail!("cannot collate an empty batch");
    }
    for (idx, inst) in insts.iter().enumerate() {
        let width = inst.as_ref().width();
        if width != pad_dim {
            bail!("sequence {} has row width {}, expected {}", idx, width, pad_dim);
        }
    }

    let batch = insts.len();
    let max_len = insts.iter().map(|inst| inst.as_ref().len()).max().unwrap_or(0);

    let mut seq_data = vec![0f32; batch * max_len * pad_dim];
    let mut pos_data = vec![0i64; batch * max_len];
    for (b, inst) in insts.iter().enumerate() {
        let inst = inst.as_ref();
        let base = b * max_len * pad_dim;
        seq_data[base..base + inst.len() * pad_dim].copy_from_slice(inst.as_slice());
        for (p, row) in inst.rows().enumerate() {
            if row.iter().any(|&v| v != 0.0) {
                pos_data[b * max_len + p] = (p + 1) as i64;
            }
        }
    }

    let batch_seq = Tensor::from_vec(seq_data, (batch, max_len, pad_dim), device)?;
    let batch_pos = Tensor::from_vec(pos_data, (batch, max_len), device)?;
    Ok((batch_seq, batch_pos))
}

/// Collate a batch of (source, angle-target) pairs.
///
/// Splits the pairs into parallel lists and pads each side independently,
/// sources at [`AA_ENCODING_DIM`] and targets at [`ANGLE_ENCODING_DIM`].
/// Returns `(src_seq, src_pos, tgt_seq, tgt_pos)`.
pub fn paired_collate_fn(
    insts: &[(Sequence, Sequence)],
    device: &Device,
) -> Result<(Tensor, Tensor, Tensor, Tensor)> {
    let (src_insts, tgt_insts): (Vec<&Sequence>, Vec<&Sequence>) =
        insts.iter().map(|(src, tgt)| (src, tgt)).unzip();
    let (src_seq, src_pos) = collate_fn(&src_insts, AA_ENCODING_DIM, device)?;
    let (tgt_seq, tgt_pos) = collate_fn(&tgt_insts, ANGLE_ENCODING_DIM, device)?;
    Ok((src_seq, src_pos, tgt_seq, tgt_pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones_seq(len: usize, width: usize) -> Sequence {
        Sequence::from_vec(vec![1f32; len * width], len, width).unwrap()
    }

    #[test]
    fn test_pad_to_longest() -> Result<()> {
        let insts = [ones_seq(2, AA_ENCODING_DIM), ones_seq(3, AA_ENCODING_DIM)];
        let (batch_seq, batch_pos) = collate_fn(&insts, AA_ENCODING_DIM, &Device::Cpu)?;

        assert_eq!(batch_seq.dims3()?, (2, 3, AA_ENCODING_DIM));
        assert_eq!(batch_pos.dims2()?, (2, 3));

        // the short sequence is padded with a zero row
        let rows = batch_seq.to_vec3::<f32>()?;
        assert!(rows[0][2].iter().all(|&v| v == 0.0));
        assert!(rows[0][1].iter().all(|&v| v == 1.0));

        let positions = batch_pos.to_vec2::<i64>()?;
        assert_eq!(positions, vec![vec![1, 2, 0], vec![1, 2, 3]]);
        Ok(())
    }

    #[test]
    fn test_equal_lengths_unchanged() -> Result<()> {
        let insts = [ones_seq(4, AA_ENCODING_DIM), ones_seq(4, AA_ENCODING_DIM)];
        let (batch_seq, batch_pos) = collate_fn(&insts, AA_ENCODING_DIM, &Device::Cpu)?;

        assert_eq!(batch_seq.dims3()?, (2, 4, AA_ENCODING_DIM));
        let rows = batch_seq.to_vec3::<f32>()?;
        for example in &rows {
            for row in example {
                assert!(row.iter().all(|&v| v == 1.0));
            }
        }
        let positions = batch_pos.to_vec2::<i64>()?;
        assert_eq!(positions, vec![vec![1, 2, 3, 4], vec![1, 2, 3, 4]]);
        Ok(())
    }

    #[test]
    fn test_zero_row_reads_as_padding() -> Result<()> {
        let mut rows = vec![vec![1f32; AA_ENCODING_DIM]; 3];
        rows[1] = vec![0f32; AA_ENCODING_DIM];
        let insts = [Sequence::from_rows(&rows, AA_ENCODING_DIM)?];

        let (_, batch_pos) = collate_fn(&insts, AA_ENCODING_DIM, &Device::Cpu)?;
        let positions = batch_pos.to_vec2::<i64>()?;
        assert_eq!(positions, vec![vec![1, 0, 3]]);
        Ok(())
    }

    #[test]
    fn test_empty_batch_rejected() {
        let insts: [Sequence; 0] = [];
        assert!(collate_fn(&insts, AA_ENCODING_DIM, &Device::Cpu).is_err());
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let insts = [ones_seq(2, ANGLE_ENCODING_DIM)];
        assert!(collate_fn(&insts, AA_ENCODING_DIM, &Device::Cpu).is_err());
    }

    #[test]
    fn test_paired_collate() -> Result<()> {
        let insts = [
            (ones_seq(2, AA_ENCODING_DIM), ones_seq(2, ANGLE_ENCODING_DIM)),
            (ones_seq(5, AA_ENCODING_DIM), ones_seq(5, ANGLE_ENCODING_DIM)),
        ];
        let (src_seq, src_pos, tgt_seq, tgt_pos) = paired_collate_fn(&insts, &Device::Cpu)?;

        assert_eq!(src_seq.dims3()?, (2, 5, AA_ENCODING_DIM));
        assert_eq!(src_pos.dims2()?, (2, 5));
        assert_eq!(tgt_seq.dims3()?, (2, 5, ANGLE_ENCODING_DIM));
        assert_eq!(tgt_pos.dims2()?, (2, 5));

        // both sides see the same lengths, so the position tensors agree
        assert_eq!(src_pos.to_vec2::<i64>()?, tgt_pos.to_vec2::<i64>()?);
        Ok(())
    }
}
