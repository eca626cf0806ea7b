use crate::data::Dataset;
use crate::encoding::{argmax, one_hot};
use crate::error::Result;
use crate::train::learner::Learner;

/// One in-order pass of `learn(image, one_hot(label))` over `data`.
pub fn train_epoch<L: Learner + ?Sized>(learner: &mut L, data: &Dataset) -> Result<()> {
    let classes = learner.output_size();
    for (image, label) in data.iter() {
        let expected = one_hot(label, classes)?;
        learner.learn(image, &expected)?;
    }
    Ok(())
}

/// Returns `(correct, total)`: how many samples' argmax output equals their label.
pub fn evaluate<L: Learner + ?Sized>(learner: &mut L, data: &Dataset) -> Result<(usize, usize)> {
    let mut correct = 0;
    for (image, label) in data.iter() {
        let output = learner.predict(image)?;
        if argmax(&output) == Some(label) {
            correct += 1;
        }
    }
    Ok((correct, data.len()))
}
