use crate::foundation::error::{IntroError, IntroResult};

pub use kurbo::{Point, Rect};

/// Absolute 0-based frame index in output timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> IntroResult<Self> {
        if start.0 > end.0 {
            return Err(IntroError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Iterate the frame indices in order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> IntroResult<Self> {
        if den == 0 {
            return Err(IntroError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(IntroError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Timestamp of frame `idx` in milliseconds.
    pub fn frame_to_ms(self, idx: FrameIndex) -> f64 {
        (idx.0 as f64) * self.frame_duration_ms()
    }

    /// Convert milliseconds to a frame count using ceil semantics.
    pub fn ms_to_frames_ceil(self, ms: f64) -> u64 {
        (ms / self.frame_duration_ms()).ceil().max(0.0) as u64
    }
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Surface size as a `f64` pair.
    pub fn size_f64(self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }

    /// Full-surface rectangle.
    pub fn rect(self) -> Rect {
        let (w, h) = self.size_f64();
        Rect::new(0.0, 0.0, w, h)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled by `opacity` (clamped to `0..=1`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }

    /// Convert to premultiplied RGBA8 bytes.
    pub fn to_premul_bytes(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn parse_hex(s: &str) -> IntroResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let byte = |i: usize| -> IntroResult<u8> {
            let pair = s
                .get(i..i + 2)
                .ok_or_else(|| IntroError::validation("truncated hex color"))?;
            u8::from_str_radix(pair, 16)
                .map_err(|_| IntroError::validation(format!("invalid hex byte \"{pair}\"")))
        };

        match s.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(IntroError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self { r, g, b, a }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
