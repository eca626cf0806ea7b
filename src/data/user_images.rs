//! Hand-drawn images supplied by the user, outside any IDX corpus.

use std::path::Path;

use tracing::{debug, warn};

use crate::data::Dataset;
use crate::encoding::Label;
use crate::error::DataError;

/// Decodes image bytes, resizes to `width × height`, converts to grayscale
/// and normalizes pixels to [0, 1].
///
/// Returns a flat row-major `Vec<f64>` of length `width * height`.
pub fn grayscale_input(bytes: &[u8], width: u32, height: u32) -> Result<Vec<f64>, DataError> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(width, height, image::imageops::FilterType::Lanczos3);
    let gray = resized.to_luma8();
    Ok(gray.pixels().map(|p| p.0[0] as f64 / 255.0).collect())
}

/// Label encoded in a file name of the form `<digit>__<anything>.<ext>`.
fn label_from_name(name: &str) -> Option<Label> {
    let mut chars = name.chars();
    let digit = chars.next()?.to_digit(10)?;
    let rest = chars.as_str();
    if rest.starts_with("__") && rest[2..].contains('.') {
        Some(digit as Label)
    } else {
        None
    }
}

/// Reads every `<digit>__*.*` image in `dir`, in file-name order.
///
/// Images are decoded to grayscale without resizing; files that fail to
/// decode or are not exactly `width × height` are skipped with a warning.
pub fn read_labeled_images(dir: &Path, width: u32, height: u32) -> Result<Dataset, DataError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut dataset = Dataset::new(width as usize, height as usize);
    for path in entries {
        let label = match path.file_name().and_then(|n| n.to_str()).and_then(label_from_name) {
            Some(label) => label,
            None => continue,
        };

        let img = match image::open(&path) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping undecodable image");
                continue;
            }
        };
        if img.width() != width || img.height() != height {
            warn!(
                path = %path.display(),
                width = img.width(),
                height = img.height(),
                "skipping image with unexpected size"
            );
            continue;
        }

        debug!(path = %path.display(), label, "image read");
        dataset.push(img.pixels().map(|p| p.0[0] as f64 / 255.0).collect(), label)?;
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn label_comes_from_the_leading_digit() {
        assert_eq!(label_from_name("7__mine.png"), Some(7));
        assert_eq!(label_from_name("0__a.b.bmp"), Some(0));
        assert_eq!(label_from_name("7_mine.png"), None);
        assert_eq!(label_from_name("x__mine.png"), None);
        assert_eq!(label_from_name("3__noext"), None);
    }

    #[test]
    fn reads_matching_images_of_the_right_size() {
        let dir = std::env::temp_dir().join(format!("handreco-images-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut img = GrayImage::new(2, 2);
        img.put_pixel(1, 0, Luma([255]));
        img.save(dir.join("3__one.png")).unwrap();
        GrayImage::new(4, 4).save(dir.join("5__too_big.png")).unwrap();
        img.save(dir.join("unlabeled.png")).unwrap();
        std::fs::write(dir.join("8__broken.png"), b"not an image").unwrap();

        let data = read_labeled_images(&dir, 2, 2).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(data.labels, vec![3]);
        assert_eq!(data.images[0], vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn grayscale_input_resizes() {
        let mut bytes = Vec::new();
        GrayImage::from_pixel(8, 8, Luma([255]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        let input = grayscale_input(&bytes, 4, 4).unwrap();
        assert_eq!(input.len(), 16);
        assert!(input.iter().all(|p| (p - 1.0).abs() < 1e-9));
    }
}
