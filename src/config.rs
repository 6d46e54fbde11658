//! Construction-time configuration.
//!
//! Every field is optional when deserializing; missing fields take the defaults of the classic
//! intro (22px glyphs, 3s per revealed column, 15s of failure banner).

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{IntroError, IntroResult};
use crate::surface::Glow;

/// Matrix loop parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Glyph cell size in pixels (also the matrix font size).
    pub glyph_size: u32,
    /// The matrix repaints only on frames where `frame % frame_gate == 0`.
    pub frame_gate: u64,
    /// Milliseconds between successive column reveals.
    pub reveal_interval_ms: f64,
    /// Columns per reveal block.
    pub columns_per_block: u32,
    /// Columns per block that stay hidden when the failure banner takes over.
    pub keep_columns: u32,
    /// How long the failure banner runs before the sequence restarts.
    pub failure_duration_ms: f64,
    /// Digits uncovered column by column.
    pub target: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            glyph_size: 22,
            frame_gate: 4,
            reveal_interval_ms: 3000.0,
            columns_per_block: 10,
            keep_columns: 2,
            failure_duration_ms: 15000.0,
            target: "9375019583".to_owned(),
        }
    }
}

impl AnimationConfig {
    /// Time from matrix start until the sequence restarts.
    pub fn loop_duration_ms(&self) -> f64 {
        f64::from(self.columns_per_block.saturating_sub(self.keep_columns))
            * self.reveal_interval_ms
            + self.failure_duration_ms
    }

    /// Reject configurations that would divide by zero or never reach the failure phase.
    pub fn validate(&self) -> IntroResult<()> {
        if self.glyph_size == 0 {
            return Err(IntroError::validation("glyph_size must be > 0"));
        }
        if self.frame_gate == 0 {
            return Err(IntroError::validation("frame_gate must be > 0"));
        }
        if !self.reveal_interval_ms.is_finite() || self.reveal_interval_ms <= 0.0 {
            return Err(IntroError::validation("reveal_interval_ms must be finite and > 0"));
        }
        if !self.failure_duration_ms.is_finite() || self.failure_duration_ms < 0.0 {
            return Err(IntroError::validation("failure_duration_ms must be finite and >= 0"));
        }
        if self.columns_per_block == 0 {
            return Err(IntroError::validation("columns_per_block must be > 0"));
        }
        if self.keep_columns >= self.columns_per_block {
            return Err(IntroError::validation(format!(
                "keep_columns ({}) must be < columns_per_block ({})",
                self.keep_columns, self.columns_per_block
            )));
        }
        let target_len = self.target.chars().count();
        if target_len > self.columns_per_block as usize {
            return Err(IntroError::validation(format!(
                "target has {target_len} chars but columns_per_block is {}",
                self.columns_per_block
            )));
        }
        Ok(())
    }
}

/// Scripted text phases played before the matrix.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Text before the timestamp in the first message.
    pub first_message_prefix: String,
    /// Text after the timestamp in the first message.
    pub first_message_suffix: String,
    /// `chrono` strftime pattern for the local timestamp.
    pub timestamp_format: String,
    /// Fixed timestamp text; when unset the local time at sequence start is used.
    pub timestamp: Option<String>,
    /// Second typed message.
    pub second_message: String,
    /// Cursor-only blink before anything is typed.
    pub opening_blink_ms: f64,
    /// Blink after the first message.
    pub first_hold_ms: f64,
    /// Blink after the second message.
    pub second_hold_ms: f64,
    /// Typing advances one char on frames where `frame % type_gate == 0`.
    pub type_gate: u64,
    /// Blink phases repaint on frames where `frame % blink_gate == 0`.
    pub blink_gate: u64,
    /// Message font size in pixels.
    pub text_size: f64,
    /// Message baseline origin `[x, y]`.
    pub text_origin: [f64; 2],
    /// Cursor left edge is the measured text width plus this offset.
    pub cursor_gap: f64,
    /// Cursor top edge.
    pub cursor_top: f64,
    /// Cursor block `[width, height]`.
    pub cursor_size: [f64; 2],
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            first_message_prefix: "Call trans opt: received. ".to_owned(),
            first_message_suffix: " REC:log>".to_owned(),
            timestamp_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_owned(),
            timestamp: None,
            second_message: "Trace program: running".to_owned(),
            opening_blink_ms: 4000.0,
            first_hold_ms: 4000.0,
            second_hold_ms: 2000.0,
            type_gate: 2,
            blink_gate: 15,
            text_size: 22.0,
            text_origin: [30.0, 35.0],
            cursor_gap: 35.0,
            cursor_top: 18.0,
            cursor_size: [18.0, 20.0],
        }
    }
}

impl ScriptConfig {
    /// Reject zero gates, negative durations and unparsable timestamp patterns.
    pub fn validate(&self) -> IntroResult<()> {
        if self.type_gate == 0 || self.blink_gate == 0 {
            return Err(IntroError::validation("type_gate and blink_gate must be > 0"));
        }
        for (name, v) in [
            ("opening_blink_ms", self.opening_blink_ms),
            ("first_hold_ms", self.first_hold_ms),
            ("second_hold_ms", self.second_hold_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(IntroError::validation(format!("{name} must be finite and >= 0")));
            }
        }
        if !self.text_size.is_finite() || self.text_size <= 0.0 {
            return Err(IntroError::validation("text_size must be finite and > 0"));
        }
        let bad_pattern = chrono::format::StrftimeItems::new(&self.timestamp_format)
            .any(|item| matches!(item, chrono::format::Item::Error));
        if bad_pattern {
            return Err(IntroError::validation(format!(
                "invalid timestamp_format \"{}\"",
                self.timestamp_format
            )));
        }
        Ok(())
    }

    /// Timestamp text for a sequence starting now.
    pub fn timestamp_now(&self) -> String {
        match &self.timestamp {
            Some(fixed) => fixed.clone(),
            None => chrono::Local::now()
                .format(&self.timestamp_format)
                .to_string(),
        }
    }

    /// First typed message for the given timestamp.
    pub fn first_message(&self, timestamp: &str) -> String {
        format!(
            "{}{}{}",
            self.first_message_prefix, timestamp, self.first_message_suffix
        )
    }
}

/// The "System failure" overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    /// Banner label.
    pub text: String,
    /// Label font size in pixels.
    pub font_size: f64,
    /// Box width in pixels.
    pub width: f64,
    /// Vertical padding between label and box edge.
    pub padding: f64,
    /// Border line width.
    pub border_width: f64,
    /// The banner toggles on frames where `frame % gate == 0`.
    pub gate: u64,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            text: "System failure".to_owned(),
            font_size: 40.0,
            width: 400.0,
            padding: 5.0,
            border_width: 2.0,
            gate: 50,
        }
    }
}

impl BannerConfig {
    /// Reject a zero gate or non-positive geometry.
    pub fn validate(&self) -> IntroResult<()> {
        if self.gate == 0 {
            return Err(IntroError::validation("banner gate must be > 0"));
        }
        if !(self.font_size > 0.0 && self.width > 0.0 && self.padding >= 0.0) {
            return Err(IntroError::validation(
                "banner font_size and width must be > 0 and padding >= 0",
            ));
        }
        Ok(())
    }
}

/// Colors shared by every phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Background fill.
    pub background: Rgba8,
    /// Text, digits, cursor and banner border.
    pub foreground: Rgba8,
    /// Halo behind typed messages.
    pub glow: Option<Glow>,
}

impl Default for Palette {
    fn default() -> Self {
        let green = Rgba8::rgb(57, 228, 57);
        Self {
            background: Rgba8::BLACK,
            foreground: green,
            glow: Some(Glow {
                color: green,
                radius: 20.0,
            }),
        }
    }
}

/// Full intro configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroConfig {
    /// Matrix loop parameters.
    pub animation: AnimationConfig,
    /// Typed/blink phases.
    pub script: ScriptConfig,
    /// Failure overlay.
    pub banner: BannerConfig,
    /// Colors.
    pub palette: Palette,
}

impl IntroConfig {
    /// Validate every section.
    pub fn validate(&self) -> IntroResult<()> {
        self.animation.validate()?;
        self.script.validate()?;
        self.banner.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> IntroResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> IntroResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
