//! Hex color recognition and conversions shared by swatches and the picker.

/// `#` followed by exactly 3 or 6 hex digits, either case.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}

/// Parse `#RGB` or `#RRGGBB` into channels.
pub fn parse_hex(value: &str) -> Option<[u8; 3]> {
    let raw = value.trim();
    if !is_hex_color(raw) {
        return None;
    }
    let digits = &raw[1..];
    if digits.len() == 3 {
        let mut rgb = [0u8; 3];
        for (slot, ch) in rgb.iter_mut().zip(digits.chars()) {
            let nibble = hex_value(ch)?;
            *slot = nibble * 16 + nibble;
        }
        return Some(rgb);
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

pub fn hex_value(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        'a'..='f' => Some(10 + (ch as u8 - b'a')),
        'A'..='F' => Some(10 + (ch as u8 - b'A')),
        _ => None,
    }
}

/// Whether black text reads better than white on top of `rgb`.
pub fn prefers_dark_text(rgb: [u8; 3]) -> bool {
    let luminance = |channel: u8| {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    let l = 0.2126 * luminance(rgb[0]) + 0.7152 * luminance(rgb[1]) + 0.0722 * luminance(rgb[2]);
    // contrast against white vs contrast against black
    (1.05 / (l + 0.05)) < ((l + 0.05) / 0.05)
}

pub fn rgb_to_hsl(rgb: [u8; 3]) -> [u16; 3] {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    let lightness = (max + min) / 2.0;
    let saturation = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * lightness - 1.0).abs())
    };

    [
        hue.round() as u16,
        (saturation * 100.0).round() as u16,
        (lightness * 100.0).round() as u16,
    ]
}

pub fn hsl_to_rgb(hsl: [u16; 3]) -> [u8; 3] {
    let h = (hsl[0] as f64 % 360.0) / 360.0;
    let s = (hsl[1] as f64 / 100.0).clamp(0.0, 1.0);
    let l = (hsl[2] as f64 / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let gray = (l * 255.0).round().clamp(0.0, 255.0) as u8;
        return [gray, gray, gray];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> u8 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    let value = if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    };

    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
