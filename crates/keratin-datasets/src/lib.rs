//! # keratin-datasets
//!
//! Dataset wrapping and batch-padding utilities for training sequence models
//! on protein data.
//!
//! __keratin-datasets__ provides:
//! * A [`Sequence`] type holding one protein's per-residue feature rows
//!   (amino-acid encodings on the source side, angle encodings on the target)
//! * A read-only [`ProteinDataset`] pairing source sequences with optional
//!   parallel angle sequences
//! * Collation functions that pad a batch of ragged sequences into a
//!   rectangular candle `Tensor` plus a 1-based position-index tensor
//!
//! The batching/iteration layer that picks batch membership and feeds the
//! collated tensors to a model lives outside this crate.
mod collate;
mod dataset;
mod sequence;

pub use self::collate::{collate_fn, paired_collate_fn};
pub use self::dataset::{DatasetItem, ProteinDataset};
pub use self::sequence::{Sequence, AA_ENCODING_DIM, ANGLE_ENCODING_DIM};
