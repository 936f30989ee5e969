//! Splitting of add records across output files.

use std::num::NonZeroUsize;

/// How add records are distributed across chunk files.
///
/// Every file holds `chunk_size` records except the last, which holds the
/// remainder, or a full chunk when the total divides evenly. An unbounded
/// plan puts every record in a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    total: usize,
    chunk_size: usize,
}

impl ChunkPlan {
    /// Plans `total` records with at most `max_entries_per_file` per file.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use ldif_generator::ChunkPlan;
    ///
    /// let plan = ChunkPlan::new(
    ///     NonZeroUsize::new(1000).expect("non-zero"),
    ///     NonZeroUsize::new(300),
    /// );
    /// assert_eq!(plan.file_count(), 4);
    /// assert_eq!(plan.sizes().collect::<Vec<_>>(), [300, 300, 300, 100]);
    /// ```
    #[must_use]
    pub fn new(total: NonZeroUsize, max_entries_per_file: Option<NonZeroUsize>) -> Self {
        let chunk_size = max_entries_per_file.map_or(total, |max| max.min(total));
        Self {
            total: total.get(),
            chunk_size: chunk_size.get(),
        }
    }

    /// Returns the number of records per full file.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of files, `ceil(total / chunk_size)`.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.total.div_ceil(self.chunk_size)
    }

    /// Returns the number of records in file `index`, or `None` past the end.
    #[must_use]
    pub fn records_in(&self, index: usize) -> Option<usize> {
        let start = index.checked_mul(self.chunk_size)?;
        let remaining = self.total.checked_sub(start).filter(|left| *left > 0)?;
        Some(remaining.min(self.chunk_size))
    }

    /// Iterates the record count of every file in order.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.file_count()).filter_map(|index| self.records_in(index))
    }
}
