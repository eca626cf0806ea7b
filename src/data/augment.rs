/// Nine copies of `image`, with the interior shifted by every `(dx, dy)` in
/// `{-1, 0, 1}²` (row-major order, `dy` outermost).
///
/// Each copy starts from the original, so the one-pixel border keeps the
/// original's values where the shifted interior does not land.  Images
/// smaller than 3×3 have no interior and are returned unchanged.
pub fn shifted_variants(image: &[f64], width: usize, height: usize) -> Vec<Vec<f64>> {
    debug_assert_eq!(image.len(), width * height);
    let mut out = Vec::with_capacity(9);
    for dy in [-1isize, 0, 1] {
        for dx in [-1isize, 0, 1] {
            let mut shifted = image.to_vec();
            for y in 1..height.saturating_sub(1) {
                for x in 1..width.saturating_sub(1) {
                    let ty = (y as isize + dy) as usize;
                    let tx = (x as isize + dx) as usize;
                    shifted[ty * width + tx] = image[y * width + x];
                }
            }
            out.push(shifted);
        }
    }
    out
}
