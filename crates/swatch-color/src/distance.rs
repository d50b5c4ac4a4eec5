/// Compute the Euclidean distance between two vectors of the same dimension.
///
/// $ d(a, b) = \sqrt{\sum_{i=1}^{n} (a_i - b_i)^2} $
///
/// Every channel is weighted equally; pick the color space to weight
/// perceptual relevance.
///
/// # Example
///
/// ```
/// use swatch_color::euclidean_distance;
///
/// let d = euclidean_distance(&[0.0, 3.0, 0.0], &[4.0, 0.0, 0.0]);
/// assert_eq!(d, 5.0);
/// ```
#[inline]
pub fn euclidean_distance<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
