/// A consecutive slice of the URL set, processed and persisted as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionBatch<'a> {
    /// 0-based position of the batch
    pub index: usize,
    pub urls: &'a [String],
}

impl ExtractionBatch<'_> {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Splits URLs into batches of `batch_size`; only the last may be shorter
///
/// A `batch_size` of 0 is treated as 1.
pub fn partition(urls: &[String], batch_size: usize) -> Vec<ExtractionBatch<'_>> {
    urls.chunks(batch_size.max(1))
        .enumerate()
        .map(|(index, urls)| ExtractionBatch { index, urls })
        .collect()
}
