//! Reader for the IDX binary format used by MNIST and its derivatives.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-3:   0x00000803  (magic, big-endian)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-3:   0x00000801  (magic, big-endian)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index
//! ```

use std::path::Path;

use tracing::info;

use crate::data::Dataset;
use crate::error::DataError;

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

pub const TRAINING_IMAGES: &str = "train-images.idx3-ubyte";
pub const TRAINING_LABELS: &str = "train-labels.idx1-ubyte";
pub const TEST_IMAGES: &str = "t10k-images.idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels.idx1-ubyte";

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

fn format_err(msg: String) -> DataError {
    DataError::Format(msg)
}

/// Parses an IDX3 image file and its IDX1 label file into a [`Dataset`].
/// Pixels are divided by 255.
pub fn parse_idx_pair(image_bytes: &[u8], label_bytes: &[u8]) -> Result<Dataset, DataError> {
    // ── Image header ────────────────────────────────────────────────────────

    if image_bytes.len() < 16 {
        return Err(format_err(format!(
            "image file too short: expected at least 16 header bytes, got {}",
            image_bytes.len()
        )));
    }
    let magic = be_u32(image_bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(format_err(format!(
            "image file magic number mismatch: expected {:#010x}, got {:#010x}",
            IMAGE_MAGIC, magic
        )));
    }

    let n_items = be_u32(image_bytes, 4) as usize;
    let rows = be_u32(image_bytes, 8) as usize;
    let cols = be_u32(image_bytes, 12) as usize;

    let n_pixels = rows.checked_mul(cols)
        .ok_or_else(|| format_err(format!("rows * cols overflows (rows={}, cols={})", rows, cols)))?;
    let data_len = n_items.checked_mul(n_pixels)
        .ok_or_else(|| format_err(format!("n_items * n_pixels overflows (n_items={}, n_pixels={})", n_items, n_pixels)))?;

    if image_bytes.len() - 16 < data_len {
        return Err(format_err(format!(
            "image file truncated: header declares {} images of {}x{} pixels ({} bytes), found {}",
            n_items, rows, cols, data_len, image_bytes.len() - 16
        )));
    }

    // ── Label header ────────────────────────────────────────────────────────

    if label_bytes.len() < 8 {
        return Err(format_err(format!(
            "label file too short: expected at least 8 header bytes, got {}",
            label_bytes.len()
        )));
    }
    let magic = be_u32(label_bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(format_err(format!(
            "label file magic number mismatch: expected {:#010x}, got {:#010x}",
            LABEL_MAGIC, magic
        )));
    }

    let label_count = be_u32(label_bytes, 4) as usize;
    if label_count != n_items {
        return Err(format_err(format!(
            "image file declares {} items but label file declares {}",
            n_items, label_count
        )));
    }
    if label_bytes.len() - 8 < n_items {
        return Err(format_err(format!(
            "label file truncated: header declares {} labels, found {}",
            n_items, label_bytes.len() - 8
        )));
    }

    // ── Samples ─────────────────────────────────────────────────────────────

    let mut dataset = Dataset::new(cols, rows);
    dataset.images = if n_pixels == 0 {
        vec![Vec::new(); n_items]
    } else {
        image_bytes[16..16 + data_len]
            .chunks_exact(n_pixels)
            .map(|chunk| chunk.iter().map(|&px| px as f64 / 255.0).collect())
            .collect()
    };
    dataset.labels = label_bytes[8..8 + n_items].iter().map(|&l| l as usize).collect();

    Ok(dataset)
}

/// Reads and parses an image/label file pair.
pub fn read_idx_pair(images: &Path, labels: &Path) -> Result<Dataset, DataError> {
    let image_bytes = std::fs::read(images)?;
    let label_bytes = std::fs::read(labels)?;
    let dataset = parse_idx_pair(&image_bytes, &label_bytes)?;
    info!(
        images = %images.display(),
        samples = dataset.len(),
        width = dataset.width,
        height = dataset.height,
        "loaded idx data"
    );
    Ok(dataset)
}

/// `train-images.idx3-ubyte` / `train-labels.idx1-ubyte` from `dir`.
pub fn read_training_data(dir: &Path) -> Result<Dataset, DataError> {
    read_idx_pair(&dir.join(TRAINING_IMAGES), &dir.join(TRAINING_LABELS))
}

/// `t10k-images.idx3-ubyte` / `t10k-labels.idx1-ubyte` from `dir`.
pub fn read_test_data(dir: &Path) -> Result<Dataset, DataError> {
    read_idx_pair(&dir.join(TEST_IMAGES), &dir.join(TEST_LABELS))
}
