//! Color maps for colorizing surfaces by their height.

use itertools::izip;

/// Colors are represented as 8-bit sRGB values with straight alpha,
/// in the order `[r, g, b, a]`.
pub type Color = [u8; 4];
pub(crate) const LUT_SIZE: usize = 256;

/// A map from values to colors.
#[derive(Clone, Debug)]
pub struct ColorMap {
    /// Name of the map, e.g. for picking one from a list.
    pub name: String,
    /// The color map expressed as a lookup table.
    ///
    /// This doesn't restrict us to interpolating in any specific color space
    /// like some kind of parametric gradient representation would,
    /// and makes sampling a simple index.
    pub(crate) lut: [Color; LUT_SIZE],
}

impl ColorMap {
    /// Create a color map from an [`enterpolation`] curve
    /// interpolating [`palette`] colors.
    pub fn from_curve<Curve, Color>(name: String, curve: Curve) -> Self
    where
        Color: palette::IntoColor<palette::Srgb>,
        Curve: enterpolation::Curve<f32, Output = Color>,
    {
        let vals = curve.take(LUT_SIZE);
        let mut lut = [[0; 4]; LUT_SIZE];
        for (color, lut_val) in izip!(vals, lut.iter_mut()) {
            let c: palette::Srgb = color.into_color();
            let as_u8 = |channel: f32| (u8::MAX as f32 * channel.clamp(0., 1.)).round() as u8;
            *lut_val = [as_u8(c.red), as_u8(c.green), as_u8(c.blue), u8::MAX];
        }
        Self { name, lut }
    }

    /// Create a color map from a function
    /// that takes a float value between 0 and 1 and returns a color.
    pub fn from_fn(name: String, curve: impl Fn(f32) -> Color) -> Self {
        // minus one because we have LUT_SIZE points
        // and thus (LUT_SIZE-1) gaps between points in the interval
        let increment = 1.0 / (LUT_SIZE - 1) as f32;
        Self {
            name,
            lut: std::array::from_fn(|i| (curve)(increment * i as f32)),
        }
    }

    /// Look up the color of `value` when `range` is mapped onto the whole map.
    ///
    /// Values outside the range are clamped to its ends.
    /// NaN, and any value in an empty range, gets the first color.
    pub fn sample(&self, value: f64, range: &std::ops::Range<f64>) -> Color {
        let t = (value - range.start) / (range.end - range.start);
        let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
        self.lut[(t * (LUT_SIZE - 1) as f64).round() as usize]
    }
}

pub mod builtin_color_maps {
    //! A collection of premade color maps.
    //!
    //! Contains the following maps:
    //! - [`sunset`]
    //! - [`molentum`]
    //! - [`grayscale`]

    use super::ColorMap;
    use enterpolation::linear::ConstEquidistantLinear;
    use palette::{FromColor, Oklab, Srgb};

    /// Convenience function for converting colors
    /// given as sRGB hexadecimal codes in 0xRRGGBB format
    /// (easily obtained from standard color pickers) to Oklab.
    ///
    /// Interpolating in Oklab gives nice perceptually uniform gradients,
    /// which is desirable for color maps.
    fn srgb_hex(val: u32) -> Oklab {
        let srgb_u8 = Srgb::from(val);
        let srgb_float: Srgb<f32> = srgb_u8.into_format();
        Oklab::from_color(srgb_float)
    }

    /// Convenience function for converting floating point sRGB values
    /// to an Oklab color.
    fn srgb_float(r: f32, g: f32, b: f32) -> Oklab {
        Oklab::from_color(Srgb::new(r, g, b))
    }

    /// Convenience function to make a color map
    /// as an array of equally spaced colors in Oklab space.
    fn linear_equidistant<const COUNT: usize>(name: &str, colors: [Oklab; COUNT]) -> ColorMap {
        ColorMap::from_curve(
            name.to_string(),
            ConstEquidistantLinear::equidistant_unchecked(colors),
        )
    }

    /// A collection of all builtin color maps.
    pub fn all_builtins() -> Vec<ColorMap> {
        vec![sunset(), molentum(), grayscale()]
    }

    /// A perceptually uniform map from dark blue to bright yellow.
    pub fn sunset() -> ColorMap {
        linear_equidistant(
            "sunset",
            [
                srgb_float(0.00, 0.05, 0.20),
                srgb_float(0.70, 0.10, 0.20),
                srgb_float(0.95, 0.90, 0.30),
            ],
        )
    }

    /// The author's signature blue and lime color scheme.
    pub fn molentum() -> ColorMap {
        linear_equidistant(
            "molentum",
            [srgb_hex(0x161f2e), srgb_hex(0x278c63), srgb_hex(0xbada55)],
        )
    }

    /// Black to white.
    pub fn grayscale() -> ColorMap {
        ColorMap::from_fn("grayscale".to_string(), |t| {
            let v = (u8::MAX as f32 * t).round() as u8;
            [v, v, v, u8::MAX]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_clamps_to_range() {
        let map = builtin_color_maps::grayscale();
        let range = -1.0..1.0;
        assert_eq!(map.sample(-1., &range), [0, 0, 0, 255]);
        assert_eq!(map.sample(1., &range), [255, 255, 255, 255]);
        assert_eq!(map.sample(-50., &range), [0, 0, 0, 255]);
        assert_eq!(map.sample(50., &range), [255, 255, 255, 255]);
        // the midpoint falls between two entries and rounds up
        assert_eq!(map.sample(0., &range), [128, 128, 128, 255]);
        assert_eq!(map.sample(f64::NAN, &range), [0, 0, 0, 255]);
        // an empty range doesn't panic
        assert_eq!(map.sample(3., &(2.0..2.0)), [255, 255, 255, 255]);
        assert_eq!(map.sample(2., &(2.0..2.0)), [0, 0, 0, 255]);
    }

    #[test]
    fn builtin_maps_are_opaque() {
        for map in builtin_color_maps::all_builtins() {
            assert!(
                map.lut.iter().all(|c| c[3] == u8::MAX),
                "map {} has transparent entries",
                map.name
            );
        }
        // sunset goes from dark to bright
        let sunset = builtin_color_maps::sunset();
        let brightness = |c: Color| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(brightness(sunset.lut[0]) < brightness(sunset.lut[LUT_SIZE - 1]));
    }
}
