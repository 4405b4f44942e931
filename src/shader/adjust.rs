//! Range adjustment functions.

/// Remap a value from one range to another.
///
/// Not clamped: values outside the source range extrapolate.
#[inline]
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let normalized = (value - from_min) / (from_max - from_min);
    to_min + normalized * (to_max - to_min)
}

/// Map a unit noise value onto a symmetric offset `[-amplitude, amplitude]`.
#[inline]
pub fn jitter(noise: f64, amplitude: f64) -> f64 {
    remap(noise, 0.0, 1.0, -amplitude, amplitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap() {
        assert_eq!(remap(0.5, 0.0, 1.0, -20.0, 20.0), 0.0);
        assert_eq!(remap(0.0, 0.0, 1.0, -20.0, 20.0), -20.0);
        assert_eq!(remap(1.0, 0.0, 1.0, -20.0, 20.0), 20.0);
        assert_eq!(remap(2.0, 0.0, 1.0, 0.0, 10.0), 20.0);
    }

    #[test]
    fn test_jitter() {
        assert_eq!(jitter(0.25, 10.0), -5.0);
        assert_eq!(jitter(1.0, 10.0), 10.0);
    }
}
