use serde::{Deserialize, Serialize};

use crate::rgb::Rgb;

/// D65 reference white in XYZ, normalized to Y = 1.
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

// CIE constants in their exact rational form.
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

// linear sRGB -> XYZ (D65)
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

// XYZ (D65) -> linear sRGB
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// A color in the CIE-XYZ space under the D65 illuminant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    /// X tristimulus value.
    pub x: f64,
    /// Y tristimulus value (luminance).
    pub y: f64,
    /// Z tristimulus value.
    pub z: f64,
}

/// A color in the CIE-Lab space with a D65 reference white.
///
/// `l` lies in [0, 100]; `a` and `b` lie roughly in [-128, 127] for colors
/// reachable from 8-bit sRGB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness.
    pub l: f64,
    /// Green-red axis.
    pub a: f64,
    /// Blue-yellow axis.
    pub b: f64,
}

#[inline]
fn srgb_to_linear(c: u8) -> f64 {
    let c = c as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f64) -> f64 {
    let c = if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    c * 255.0
}

#[inline]
fn mat3_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > EPSILON {
        f3
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

impl Xyz {
    /// The tristimulus values as an array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Convert to CIE-Lab relative to the D65 white point.
    pub fn to_lab(&self) -> Lab {
        let fx = lab_f(self.x / D65_WHITE[0]);
        let fy = lab_f(self.y / D65_WHITE[1]);
        let fz = lab_f(self.z / D65_WHITE[2]);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Convert back to 8-bit sRGB, clamping out-of-gamut values.
    pub fn to_rgb(&self) -> Rgb {
        let linear = mat3_mul(&XYZ_TO_RGB, self.to_array());
        Rgb::from_f64_rounded(linear.map(linear_to_srgb))
    }
}

impl Lab {
    /// The channels as an array in L, a, b order.
    pub fn to_array(&self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Convert to CIE-XYZ under D65.
    pub fn to_xyz(&self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let yr = if self.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            self.l / KAPPA
        };

        Xyz {
            x: lab_f_inv(fx) * D65_WHITE[0],
            y: yr * D65_WHITE[1],
            z: lab_f_inv(fz) * D65_WHITE[2],
        }
    }

    /// Convert back to 8-bit sRGB.
    ///
    /// The result is rounded to the nearest integer channel, so a round trip
    /// through Lab may differ from the original color by one unit per channel.
    pub fn to_rgb(&self) -> Rgb {
        self.to_xyz().to_rgb()
    }
}

impl Rgb {
    /// Convert to CIE-XYZ (D65) through the sRGB transfer function.
    pub fn to_xyz(&self) -> Xyz {
        let linear = self.channels().map(srgb_to_linear);
        let [x, y, z] = mat3_mul(&RGB_TO_XYZ, linear);
        Xyz { x, y, z }
    }

    /// Convert to CIE-Lab with a D65 reference white.
    ///
    /// # Example
    ///
    /// ```
    /// use swatch_color::Rgb;
    ///
    /// let lab = Rgb::new(255, 255, 255).to_lab();
    ///
    /// assert!((lab.l - 100.0).abs() < 1e-3);
    /// assert!(lab.a.abs() < 1e-2);
    /// assert!(lab.b.abs() < 1e-2);
    /// ```
    pub fn to_lab(&self) -> Lab {
        self.to_xyz().to_lab()
    }
}
