use image::{Rgb, Rgba, RgbaImage};
use ndarray::{s, Array2, ArrayView1, Axis};

use super::projection::Segment;

/// Background color from the 4 corners and the 4 edge midpoints.
///
/// Each RGB channel is the median of the 8 samples. With an even count the median is
/// the mean of the two middle values, rounded down. Alpha is ignored.
///
/// Empty images give black. Callers should reject those before getting here.
pub fn estimate_background_color(img: &RgbaImage) -> Rgb<u8> {
    let (width, height) = img.dimensions();

    if width == 0 || height == 0 {
        return Rgb([0, 0, 0]);
    }

    let (right, bottom) = (width - 1, height - 1);
    let (mid_x, mid_y) = (width / 2, height / 2);

    let samples = [
        (0, 0),
        (mid_x, 0),
        (right, 0),
        (0, mid_y),
        (right, mid_y),
        (0, bottom),
        (mid_x, bottom),
        (right, bottom),
    ]
    .map(|(x, y)| *img.get_pixel(x, y));

    let channel_median = |channel: usize| {
        let mut values = samples.map(|pixel| pixel[channel]);
        values.sort_unstable();

        ((values[3] as u16 + values[4] as u16) / 2) as u8
    };

    Rgb([channel_median(0), channel_median(1), channel_median(2)])
}

/// Chebyshev distance over RGB against `bg`. Alpha is not looked at.
pub fn is_background(pixel: &Rgba<u8>, bg: Rgb<u8>, tolerance: u8) -> bool {
    pixel.0[..3]
        .iter()
        .zip(bg.0.iter())
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap_or(0)
        <= tolerance
}

/// Sets alpha to 0 on every pixel that classifies as background.
///
/// Sprite pixels that happen to be within tolerance of the background go too.
pub fn make_background_transparent(img: &mut RgbaImage, bg: Rgb<u8>, tolerance: u8) {
    img.pixels_mut()
        .filter(|pixel| is_background(pixel, bg, tolerance))
        .for_each(|pixel| pixel[3] = 0);
}

/// Per pixel foreground classification of a whole sheet.
///
/// Indexed `[y, x]`, `true` means not background.
#[derive(Debug, Clone)]
pub struct ForegroundMask {
    mask: Array2<bool>,
}

fn count_foreground(lane: ArrayView1<bool>) -> usize {
    lane.iter().filter(|is_fg| **is_fg).count()
}

impl ForegroundMask {
    pub fn new(img: &RgbaImage, bg: Rgb<u8>, tolerance: u8) -> Self {
        let (width, height) = img.dimensions();

        let mask = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            !is_background(img.get_pixel(x as u32, y as u32), bg, tolerance)
        });

        Self { mask }
    }

    pub fn width(&self) -> usize {
        self.mask.ncols()
    }

    pub fn height(&self) -> usize {
        self.mask.nrows()
    }

    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.mask[[y, x]]
    }

    pub fn foreground_count(&self) -> usize {
        self.mask.iter().filter(|is_fg| **is_fg).count()
    }

    /// Foreground count of every row.
    pub fn row_projection(&self) -> Vec<usize> {
        self.mask.map_axis(Axis(1), count_foreground).to_vec()
    }

    /// Foreground count of every column, only looking at the rows inside `band`.
    pub fn column_projection(&self, band: Segment) -> Vec<usize> {
        self.mask
            .slice(s![band.start..band.end, ..])
            .map_axis(Axis(0), count_foreground)
            .to_vec()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const BG: Rgba<u8> = Rgba([40, 120, 200, 255]);

    fn filled(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    #[test]
    fn uniform_background() {
        let img = filled(9, 7, BG);

        assert_eq!(estimate_background_color(&img), Rgb([40, 120, 200]));
    }

    #[test]
    fn one_bad_sample_does_not_move_estimate() {
        let mut img = filled(9, 7, BG);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        assert_eq!(estimate_background_color(&img), Rgb([40, 120, 200]));
    }

    #[test]
    fn median_of_even_count_rounds_down() {
        // 4 samples at 10 and 4 at 21 per channel, (10 + 21) / 2 = 15
        let mut img = filled(3, 3, Rgba([10, 10, 10, 255]));
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            img.put_pixel(x, y, Rgba([21, 21, 21, 255]));
        }

        assert_eq!(estimate_background_color(&img), Rgb([15, 15, 15]));
    }

    #[test]
    fn single_pixel_sheet() {
        let img = filled(1, 1, Rgba([1, 2, 3, 0]));

        assert_eq!(estimate_background_color(&img), Rgb([1, 2, 3]));
    }

    #[test]
    fn empty_sheet_is_black() {
        let img = RgbaImage::new(0, 0);

        assert_eq!(estimate_background_color(&img), Rgb([0, 0, 0]));
    }

    #[test]
    fn tolerance_is_inclusive() {
        let bg = Rgb([100, 100, 100]);

        assert!(is_background(&Rgba([125, 100, 100, 255]), bg, 25));
        assert!(is_background(&Rgba([75, 125, 100, 255]), bg, 25));
        assert!(!is_background(&Rgba([126, 100, 100, 255]), bg, 25));
        assert!(!is_background(&Rgba([100, 100, 74, 255]), bg, 25));
    }

    #[test]
    fn alpha_is_ignored() {
        let bg = Rgb([100, 100, 100]);

        assert!(is_background(&Rgba([100, 100, 100, 0]), bg, 25));
        assert!(!is_background(&Rgba([0, 0, 0, 0]), bg, 25));
    }

    #[test]
    fn mask_and_projections() {
        let mut img = filled(6, 4, BG);
        img.put_pixel(1, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(4, 2, Rgba([255, 255, 255, 255]));

        let mask = ForegroundMask::new(&img, Rgb([40, 120, 200]), 25);

        assert_eq!(mask.width(), 6);
        assert_eq!(mask.height(), 4);
        assert!(mask.is_foreground(1, 1));
        assert!(!mask.is_foreground(0, 0));
        assert_eq!(mask.foreground_count(), 3);
        assert_eq!(mask.row_projection(), vec![0, 2, 1, 0]);
        assert_eq!(
            mask.column_projection(Segment::new(0, 4)),
            vec![0, 1, 1, 0, 1, 0]
        );
        assert_eq!(
            mask.column_projection(Segment::new(1, 2)),
            vec![0, 1, 1, 0, 0, 0]
        );
    }

    #[test]
    fn transparency_follows_classification() {
        let mut img = filled(2, 1, BG);
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        make_background_transparent(&mut img, Rgb([40, 120, 200]), 25);

        assert_eq!(*img.get_pixel(0, 0), Rgba([40, 120, 200, 0]));
        assert_eq!(*img.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
    }
}
