pub use kurbo::{Rect, Size};

/// Width-over-height ratio of the preview frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// 16:9, used whenever no background dimensions are known.
    pub const DEFAULT: Self = Self(16.0 / 9.0);

    /// Ratio of native pixel dimensions; `None` for a degenerate (zero-sized) image.
    pub fn from_dims(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self(f64::from(width) / f64::from(height)))
    }

    /// Raw ratio value.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Frame height for a given frame width. The frame follows the asset shape (no letterboxing).
    pub fn height_for_width(self, width: f64) -> f64 {
        width / self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Native pixel dimensions of a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageDims {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// `#FFFFFF`.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
    /// `#000000`.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
