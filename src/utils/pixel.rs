use std::fmt::{Debug, Display};

/// Coefficients of the BT.601 luma (Y) value, scaled to integers so the
/// weighted sum floors exactly.
pub const BT601_LUMA: [u32; 3] = [299, 587, 114];
pub const BT601_LUMA_DIV: u32 = 1000;

/// F64 coefficients, same values as the integer version.
pub const BT601_LUMA_F64: [f64; 3] = [0.299, 0.587, 0.114];

/// One RGBA pixel, 8 bits per channel.
#[derive(PartialEq, Eq, Hash, Debug, Default, Clone, Copy)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    #[inline]
    pub const fn from_u8_array(data: &[u8; 4]) -> Rgba {
        Rgba::new(data[0], data[1], data[2], data[3])
    }

    #[inline]
    pub const fn to_u8_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub const fn from_rgb(rgb: [u8; 3], a: u8) -> Rgba {
        Rgba::new(rgb[0], rgb[1], rgb[2], a)
    }

    /// Apply `f` to R, G and B, keeping alpha.
    #[inline(always)]
    pub fn map_rgb<F: Fn(u8) -> u8>(self, f: F) -> Rgba {
        Rgba::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Floor of the BT.601 weighted sum.
    #[inline]
    pub fn luma(self) -> u8 {
        let sum = self.r as u32 * BT601_LUMA[0]
            + self.g as u32 * BT601_LUMA[1]
            + self.b as u32 * BT601_LUMA[2];
        (sum / BT601_LUMA_DIV) as u8
    }

    /// Squared euclidean distance in RGB space, alpha ignored.
    #[inline]
    pub fn distance_squared(self, other: Rgba) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(value: [u8; 4]) -> Self {
        Rgba::from_u8_array(&value)
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(value: Rgba) -> Self {
        value.to_u8_array()
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
