use embedded_graphics::pixelcolor::Rgb888;

use crate::config::ColorConfig;

/// Yields the color for the next frame's on discs.
pub struct ColorSource {
    inner: Inner,
}

enum Inner {
    Fixed(Rgb888),
    Rainbow(Box<dyn Iterator<Item = Rgb888> + Send>),
}

impl ColorSource {
    pub fn next_color(&mut self) -> Rgb888 {
        match &mut self.inner {
            Inner::Fixed(color) => *color,
            Inner::Rainbow(colors) => colors.next().unwrap_or_default(),
        }
    }
}

impl From<ColorConfig> for ColorSource {
    fn from(value: ColorConfig) -> Self {
        let inner = match value {
            ColorConfig::White => Inner::Fixed(Rgb888::new(255, 255, 255)),
            ColorConfig::Fixed { r, g, b } => Inner::Fixed(Rgb888::new(r, g, b)),
            ColorConfig::Rainbow => Inner::Rainbow(Box::new(rainbow_color_iterator())),
        };

        Self { inner }
    }
}

fn rainbow_color_iterator() -> impl Iterator<Item = Rgb888> {
    fn hsv_to_rgb(hue: f32) -> (u8, u8, u8) {
        let h = hue % 1.0;
        let c = 1.0;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = 0.0;

        let (r, g, b) = match (h * 6.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            5 => (c, 0.0, x),
            _ => (0.0, 0.0, 0.0),
        };

        (
            ((r + m) * 255.0) as u8,
            ((g + m) * 255.0) as u8,
            ((b + m) * 255.0) as u8,
        )
    }

    std::iter::successors(Some(0.0), |&t| Some((t + 0.01) % 1.0))
        .map(hsv_to_rgb)
        .map(|(r, g, b)| Rgb888::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sources_never_drift() {
        let mut source = ColorSource::from(ColorConfig::Fixed { r: 10, g: 20, b: 30 });

        let first = source.next_color();
        for _ in 0..10 {
            assert_eq!(source.next_color(), first);
        }
    }

    #[test]
    fn white_is_full_intensity() {
        let mut source = ColorSource::from(ColorConfig::White);
        assert_eq!(source.next_color(), Rgb888::new(255, 255, 255));
    }

    #[test]
    fn rainbow_cycles_through_hues() {
        let mut source = ColorSource::from(ColorConfig::Rainbow);

        let colors: Vec<_> = (0..50).map(|_| source.next_color()).collect();
        let distinct: std::collections::HashSet<_> =
            colors.iter().map(|c| format!("{c:?}")).collect();

        assert!(distinct.len() > 10, "only {} distinct colors", distinct.len());
    }
}
