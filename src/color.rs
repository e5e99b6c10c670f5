/// An RGB triple. Channel range is enforced by the type, so out-of-range
/// colors are rejected before they ever reach a distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Squared euclidean distance between two colors, used as a cheap proxy for
/// perceptual distance. Each channel difference is squared independently
/// before summing; no channel weighting.
pub fn square_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_distance_is_symmetric() {
        let samples = [
            (Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)),
            (Rgb::new(30, 140, 50), Rgb::new(31, 141, 51)),
            (Rgb::new(10, 200, 0), Rgb::new(200, 10, 255)),
        ];

        for (a, b) in samples {
            assert_eq!(square_distance(a, b), square_distance(b, a));
        }
    }

    #[test]
    fn test_square_distance_is_zero_only_for_identical_colors() {
        let a = Rgb::new(30, 140, 50);

        assert_eq!(0, square_distance(a, a));
        assert!(square_distance(a, Rgb::new(30, 140, 51)) > 0);
        assert!(square_distance(a, Rgb::new(29, 140, 50)) > 0);
        assert!(square_distance(a, Rgb::new(30, 141, 50)) > 0);
    }

    #[test]
    fn test_square_distance_squares_each_channel_difference_independently() {
        // A formula that squares a raw channel value instead of the channel
        // difference would not return 25 here.
        assert_eq!(
            25,
            square_distance(Rgb::new(0, 0, 0), Rgb::new(0, 0, 5))
        );
        assert_eq!(
            25,
            square_distance(Rgb::new(0, 0, 5), Rgb::new(0, 0, 0))
        );
        assert_eq!(
            3,
            square_distance(Rgb::new(1, 1, 1), Rgb::new(2, 2, 2))
        );
    }

    #[test]
    fn test_square_distance_grows_with_channel_difference() {
        let target = Rgb::new(30, 140, 50);

        let mut last = 0;
        for step in 1..=5 {
            let d = square_distance(target, Rgb::new(30, 140, 50 + step));
            assert!(d > last);
            last = d;
        }
    }
}
