//! A fixed-size, read-only container of protein sequences.
use crate::Sequence;
use candle_core::{bail, Result};

/// One dataset entry: the source sequence alone, or paired with its angle
/// targets when the dataset was built with them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DatasetItem<'a> {
    Source(&'a Sequence),
    Paired(&'a Sequence, &'a Sequence),
}

/// An indexable collection of source sequences with optional parallel angle
/// sequences. Immutable after construction; `get` is safe to call from
/// multiple reader threads.
#[derive(Debug, Clone)]
pub struct ProteinDataset {
    seqs: Vec<Sequence>,
    angs: Option<Vec<Sequence>>,
}

impl ProteinDataset {
    /// Create a dataset. When `angs` is present it must be parallel to
    /// `seqs`, one angle sequence per source sequence.
    pub fn new(seqs: Vec<Sequence>, angs: Option<Vec<Sequence>>) -> Result<Self> {
        if let Some(angs) = &angs {
            if angs.len() != seqs.len() {
                bail!(
                    "{} angle sequences for {} source sequences",
                    angs.len(),
                    seqs.len()
                );
            }
        }
        Ok(Self { seqs, angs })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    /// The example at `idx`; fails when `idx` is out of range.
    pub fn get(&self, idx: usize) -> Result<DatasetItem<'_>> {
        if idx >= self.seqs.len() {
            bail!(
                "index {} out of range for dataset of {} examples",
                idx,
                self.seqs.len()
            );
        }
        Ok(match &self.angs {
            Some(angs) => DatasetItem::Paired(&self.seqs[idx], &angs[idx]),
            None => DatasetItem::Source(&self.seqs[idx]),
        })
    }
}
