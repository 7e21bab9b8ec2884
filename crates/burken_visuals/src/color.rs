//! Hex цвета (0xRRGGBB) и HSL-сдвиги для производных оттенков

use serde::{Deserialize, Serialize};
use std::fmt;

/// sRGB цвет в формате 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn hex(self) -> u32 {
        self.0 & 0xffffff
    }

    pub fn channels(self) -> (u8, u8, u8) {
        let hex = self.hex();
        ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Rgb(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// HSL компоненты, каждая в 0..=1
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let (r, g, b) = self.channels();
        let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (min + max) / 2.0;

        if max == min {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let hue = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        (hue / 6.0, saturation, lightness)
    }

    /// Hue оборачивается по кругу, saturation/lightness клампятся в 0..=1
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hue = hue.rem_euclid(1.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        if saturation == 0.0 {
            let v = to_byte(lightness);
            return Rgb::from_channels(v, v, v);
        }

        let p = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let q = 2.0 * lightness - p;

        Rgb::from_channels(
            to_byte(hue_to_channel(q, p, hue + 1.0 / 3.0)),
            to_byte(hue_to_channel(q, p, hue)),
            to_byte(hue_to_channel(q, p, hue - 1.0 / 3.0)),
        )
    }

    /// Сдвиг в HSL пространстве (производные оттенки конечностей/головы/акцента)
    pub fn offset_hsl(self, hue: f32, saturation: f32, lightness: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Rgb::from_hsl(h + hue, s + saturation, l + lightness)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

fn to_byte(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<u32> for Rgb {
    fn from(hex: u32) -> Self {
        Rgb(hex)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        assert_eq!(Rgb(0x4a90e2).channels(), (0x4a, 0x90, 0xe2));
        assert_eq!(Rgb::from_channels(0xff, 0x44, 0x44), Rgb(0xff4444));
        assert_eq!(Rgb(0x002200).to_string(), "#002200");
    }

    #[test]
    fn test_hsl_roundtrip_primaries() {
        for color in [Rgb(0xff0000), Rgb(0x00ff00), Rgb(0x0000ff), Rgb::WHITE, Rgb::BLACK, Rgb(0x808080)] {
            let (h, s, l) = color.to_hsl();
            assert_eq!(Rgb::from_hsl(h, s, l), color);
        }
    }

    #[test]
    fn test_offset_lightness() {
        let (_, _, l) = Rgb(0xff0000).to_hsl();
        assert!((l - 0.5).abs() < 1e-6);

        // Red, lightness 0.5 → 0.75
        assert_eq!(Rgb(0xff0000).offset_hsl(0.0, 0.0, 0.25), Rgb(0xff8080));
        // Clamp: белый светлее не становится
        assert_eq!(Rgb::WHITE.offset_hsl(0.0, 0.0, 0.12), Rgb::WHITE);
    }

    #[test]
    fn test_offset_hue_wraps() {
        // Red + 1/3 hue → green
        assert_eq!(Rgb(0xff0000).offset_hsl(1.0 / 3.0, 0.0, 0.0), Rgb(0x00ff00));
        assert_eq!(Rgb(0xff0000).offset_hsl(-1.0, 0.0, 0.0), Rgb(0xff0000));
    }
}
