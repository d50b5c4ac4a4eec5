use serde::{Deserialize, Serialize};

use crate::rgb::Rgb;

/// A color in the CMYK space with every channel in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    /// Cyan.
    pub c: f64,
    /// Magenta.
    pub m: f64,
    /// Yellow.
    pub y: f64,
    /// Key (black).
    pub k: f64,
}

impl Cmyk {
    /// The channels as an array in C, M, Y, K order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.c, self.m, self.y, self.k]
    }

    /// The channels scaled to percentages in [0, 100].
    pub fn to_percent(&self) -> [f64; 4] {
        self.to_array().map(|v| v * 100.0)
    }

    /// Convert back to 8-bit sRGB.
    pub fn to_rgb(&self) -> Rgb {
        let white = 1.0 - self.k;
        Rgb::from_f64_rounded([
            255.0 * (1.0 - self.c) * white,
            255.0 * (1.0 - self.m) * white,
            255.0 * (1.0 - self.y) * white,
        ])
    }
}

impl Rgb {
    /// Convert to CMYK.
    ///
    /// Pure black has `k == 1` and defines `c = m = y = 0` instead of
    /// dividing by zero.
    ///
    /// # Example
    ///
    /// ```
    /// use swatch_color::Rgb;
    ///
    /// let black = Rgb::new(0, 0, 0).to_cmyk();
    ///
    /// assert_eq!(black.to_array(), [0.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(black.to_percent()[3], 100.0);
    /// ```
    pub fn to_cmyk(&self) -> Cmyk {
        let [r, g, b] = self.to_array().map(|v| v / 255.0);
        let k = 1.0 - r.max(g).max(b);

        if k >= 1.0 {
            return Cmyk {
                c: 0.0,
                m: 0.0,
                y: 0.0,
                k: 1.0,
            };
        }

        let white = 1.0 - k;
        Cmyk {
            c: (1.0 - r - k) / white,
            m: (1.0 - g - k) / white,
            y: (1.0 - b - k) / white,
            k,
        }
    }
}
