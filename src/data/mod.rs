//! Labeled image sets and the readers that produce them.

pub mod augment;
pub mod idx;
pub mod user_images;

use crate::encoding::Label;
use crate::error::DataError;

pub use idx::{parse_idx_pair, read_test_data, read_training_data};
pub use user_images::read_labeled_images;

/// Flattened grayscale images with one class label each.
///
/// Pixels are row-major and scaled into `[0.0, 1.0]`; every image has
/// `width * height` values and there is exactly one label per image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    width: usize,
    height: usize,
    images: Vec<Vec<f64>>,
    labels: Vec<Label>,
}

impl Dataset {
    pub fn new(width: usize, height: usize) -> Dataset {
        Dataset { width, height, images: Vec::new(), labels: Vec::new() }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn images(&self) -> &[Vec<f64>] {
        &self.images
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Appends one sample.  Fails if `image` does not have `width * height` pixels.
    pub fn push(&mut self, image: Vec<f64>, label: Label) -> Result<(), DataError> {
        if image.len() != self.pixel_count() {
            return Err(DataError::Format(format!(
                "image has {} pixels, expected {}x{}",
                image.len(),
                self.width,
                self.height
            )));
        }
        self.images.push(image);
        self.labels.push(label);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], Label)> + '_ {
        self.images.iter().map(|i| i.as_slice()).zip(self.labels.iter().copied())
    }

    /// Splits into the first `at` samples and the rest.  `at` is clamped to
    /// the dataset length.
    pub fn split_at(mut self, at: usize) -> (Dataset, Dataset) {
        let at = at.min(self.len());
        let rest = Dataset {
            width: self.width,
            height: self.height,
            images: self.images.split_off(at),
            labels: self.labels.split_off(at),
        };
        (self, rest)
    }

    /// Replaces every image with its nine one-pixel shifts.
    pub fn augmented(&self) -> Dataset {
        let mut out = Dataset::new(self.width, self.height);
        for (image, label) in self.iter() {
            for variant in augment::shifted_variants(image, self.width, self.height) {
                out.images.push(variant);
                out.labels.push(label);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Dataset {
        let mut d = Dataset::new(3, 3);
        for i in 0..n {
            d.push(vec![i as f64 / 10.0; 9], i % 10).unwrap();
        }
        d
    }

    #[test]
    fn split_keeps_order() {
        let (learn, verify) = sample(5).split_at(3);
        assert_eq!(learn.labels, vec![0, 1, 2]);
        assert_eq!(verify.labels, vec![3, 4]);
        assert_eq!(verify.width(), 3);
    }

    #[test]
    fn split_past_the_end_is_clamped() {
        let (learn, verify) = sample(2).split_at(10);
        assert_eq!(learn.len(), 2);
        assert!(verify.is_empty());
    }

    #[test]
    fn push_rejects_wrong_pixel_count() {
        let mut d = sample(1);
        assert!(matches!(d.push(vec![0.0; 4], 1), Err(DataError::Format(_))));
        assert_eq!(d.len(), 1);
        assert_eq!(d.labels().len(), d.images().len());

        let (learn, verify) = d.split_at(5);
        assert_eq!((learn.len(), verify.len()), (1, 0));
    }

    #[test]
    fn augmentation_multiplies_by_nine() {
        let augmented = sample(2).augmented();
        assert_eq!(augmented.len(), 18);
        assert!(augmented.labels[..9].iter().all(|l| *l == 0));
        assert!(augmented.labels[9..].iter().all(|l| *l == 1));
    }
}
