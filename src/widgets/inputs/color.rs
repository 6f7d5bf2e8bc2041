use crate::core::color::{
    hex_value, hsl_to_rgb, is_hex_color, parse_hex, rgb_to_hex, rgb_to_hsl,
};
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorMode {
    Hex,
    Rgb,
    Hsl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    First = 0,
    Second = 1,
    Third = 2,
}

impl Channel {
    fn next(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::Third,
            Self::Third => Self::First,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::First => Self::Third,
            Self::Second => Self::First,
            Self::Third => Self::Second,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Channel editor for a single color, used inside the color session.
///
/// The picker tracks two things: the working RGB triple, and the text the
/// user typed (or the color it was opened with). The typed text wins on
/// commit as long as it is still a valid hex color, so `#fff` is kept as
/// `#fff` unless a channel was changed.
pub struct ColorPicker {
    rgb: [u8; 3],
    mode: ColorMode,
    channel: Channel,
    edit_buffer: String,
    edit_mode: ColorMode,
    edit_channel: Channel,
    text_entry: Option<String>,
    typed: Option<String>,
    entry_base: Option<([u8; 3], Option<String>)>,
}

impl ColorPicker {
    pub fn new(initial: &str) -> Self {
        let rgb = parse_hex(initial).unwrap_or([0, 0, 0]);
        Self {
            rgb,
            mode: ColorMode::Hex,
            channel: Channel::First,
            edit_buffer: String::new(),
            edit_mode: ColorMode::Hex,
            edit_channel: Channel::First,
            text_entry: None,
            typed: is_hex_color(initial).then(|| initial.to_string()),
            entry_base: None,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    /// Value the session commits.
    pub fn working_value(&self) -> String {
        match &self.typed {
            Some(text) if is_hex_color(text) => text.clone(),
            _ => rgb_to_hex(self.rgb),
        }
    }

    pub fn is_typing(&self) -> bool {
        self.text_entry.is_some()
    }

    fn reset_edit_buffer(&mut self) {
        self.edit_buffer.clear();
        self.edit_mode = self.mode;
        self.edit_channel = self.channel;
    }

    fn ensure_edit_buffer(&mut self) {
        if self.edit_mode != self.mode || self.edit_channel != self.channel {
            self.reset_edit_buffer();
        }
    }

    fn cycle_mode(&mut self) {
        self.mode = match self.mode {
            ColorMode::Hex => ColorMode::Rgb,
            ColorMode::Rgb => ColorMode::Hsl,
            ColorMode::Hsl => ColorMode::Hex,
        };
        self.reset_edit_buffer();
    }

    fn set_rgb(&mut self, rgb: [u8; 3]) {
        self.rgb = rgb;
        self.typed = None;
    }

    fn adjust_channel(&mut self, delta: i32) {
        let mut rgb = self.rgb;
        match self.mode {
            ColorMode::Hex | ColorMode::Rgb => {
                let idx = self.channel.index();
                rgb[idx] = (rgb[idx] as i32 + delta).clamp(0, 255) as u8;
            }
            ColorMode::Hsl => {
                let mut hsl = rgb_to_hsl(rgb);
                let (idx, max) = match self.channel {
                    Channel::First => (0, 360),
                    Channel::Second => (1, 100),
                    Channel::Third => (2, 100),
                };
                hsl[idx] = (hsl[idx] as i32 + delta).clamp(0, max) as u16;
                rgb = hsl_to_rgb(hsl);
            }
        }
        self.set_rgb(rgb);
        self.reset_edit_buffer();
    }

    fn handle_digit(&mut self, ch: char) -> bool {
        self.ensure_edit_buffer();
        match self.mode {
            ColorMode::Hex => self.handle_hex_digit(ch),
            ColorMode::Rgb => self.handle_decimal_digit(ch),
            ColorMode::Hsl => self.handle_decimal_digit(ch),
        }
    }

    fn handle_hex_digit(&mut self, ch: char) -> bool {
        let Some(digit) = hex_value(ch) else {
            return false;
        };

        if self.edit_buffer.len() >= 2 {
            self.edit_buffer.clear();
        }
        self.edit_buffer.push(ch.to_ascii_uppercase());

        let value = if self.edit_buffer.len() == 1 {
            digit * 16
        } else {
            parse_hex_pair_prefix(self.edit_buffer.as_str()).unwrap_or(digit * 16)
        };

        let mut rgb = self.rgb;
        rgb[self.channel.index()] = value;
        self.set_rgb(rgb);
        true
    }

    fn handle_decimal_digit(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() {
            return false;
        }
        if self.edit_buffer.len() >= 3 {
            self.edit_buffer.clear();
        }
        self.edit_buffer.push(ch);
        self.apply_buffer();
        true
    }

    fn handle_backspace(&mut self) -> bool {
        if self.edit_buffer.is_empty() {
            return false;
        }

        self.edit_buffer.pop();
        if !self.edit_buffer.is_empty() {
            self.apply_buffer();
        }
        true
    }

    fn apply_buffer(&mut self) {
        let mut rgb = self.rgb;
        match self.mode {
            ColorMode::Hex => {
                rgb[self.channel.index()] =
                    parse_hex_high_nibble(self.edit_buffer.as_str()).unwrap_or(0);
            }
            ColorMode::Rgb => {
                rgb[self.channel.index()] = parse_clamped(self.edit_buffer.as_str(), 255) as u8;
            }
            ColorMode::Hsl => {
                let mut hsl = rgb_to_hsl(rgb);
                let (idx, max) = match self.channel {
                    Channel::First => (0, 360),
                    Channel::Second => (1, 100),
                    Channel::Third => (2, 100),
                };
                hsl[idx] = parse_clamped(self.edit_buffer.as_str(), max);
                rgb = hsl_to_rgb(hsl);
            }
        }
        self.set_rgb(rgb);
    }

    /// Free text entry: `#` followed by up to six hex digits. The working
    /// color follows the text whenever it forms a valid color; while it does
    /// not, the color from before `#` was pressed is restored.
    fn on_text_entry_key(&mut self, key: KeyEvent) -> Option<InteractionResult> {
        let buffer = self.text_entry.as_mut()?;
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_hexdigit() => {
                if buffer.len() < 7 {
                    buffer.push(ch);
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
                if buffer.is_empty() {
                    self.text_entry = None;
                    self.entry_base = None;
                    return Some(InteractionResult::handled());
                }
            }
            _ => {
                self.text_entry = None;
                self.entry_base = None;
                return None;
            }
        }

        let text = self.text_entry.clone().unwrap_or_default();
        match parse_hex(&text) {
            Some(rgb) if is_hex_color(&text) => {
                self.rgb = rgb;
                self.typed = Some(text);
            }
            _ => {
                if let Some((rgb, typed)) = self.entry_base.clone() {
                    self.rgb = rgb;
                    self.typed = typed;
                }
            }
        }
        Some(InteractionResult::handled())
    }

    fn render_parts(&self, focused: bool) -> (Vec<Span>, usize) {
        let mut parts = Vec::<(String, Option<Channel>)>::new();
        parts.push(("■ ".to_string(), None));

        if let Some(text) = &self.text_entry {
            let style = if is_hex_color(text) {
                Style::new().color(Color::Cyan).bold()
            } else {
                Style::new().color(Color::Yellow)
            };
            let swatch = Style::new().color(Color::from_rgb(self.rgb));
            let offset = UnicodeWidthStr::width("■ ") + UnicodeWidthStr::width(text.as_str());
            return (
                vec![Span::styled("■ ", swatch), Span::styled(text.clone(), style)],
                offset,
            );
        }

        match self.mode {
            ColorMode::Hex => {
                let hex = rgb_to_hex(self.rgb);
                parts.push(("#".to_string(), None));
                parts.push((hex[1..3].to_string(), Some(Channel::First)));
                parts.push((hex[3..5].to_string(), Some(Channel::Second)));
                parts.push((hex[5..7].to_string(), Some(Channel::Third)));
            }
            ColorMode::Rgb => {
                let [r, g, b] = self.rgb;
                push_channels(&mut parts, [("R:", r as u16), ("G:", g as u16), ("B:", b as u16)]);
            }
            ColorMode::Hsl => {
                let [h, s, l] = rgb_to_hsl(self.rgb);
                push_channels(&mut parts, [("H:", h), ("S:", s), ("L:", l)]);
            }
        }

        let active_style = Style::new().color(Color::Cyan).bold();
        let mut spans = Vec::<Span>::new();
        let mut offset = 0usize;
        let mut cursor_offset = 0usize;
        for (idx, (text, channel)) in parts.into_iter().enumerate() {
            let mut style = Style::default();
            if idx == 0 {
                style = Style::new().color(Color::from_rgb(self.rgb));
            }
            if focused && channel == Some(self.channel) {
                style = active_style;
                cursor_offset = offset;
            }
            offset += UnicodeWidthStr::width(text.as_str());
            spans.push(Span::styled(text, style));
        }

        (spans, cursor_offset)
    }
}

fn push_channels(parts: &mut Vec<(String, Option<Channel>)>, channels: [(&str, u16); 3]) {
    let ids = [Channel::First, Channel::Second, Channel::Third];
    for (idx, ((name, value), channel)) in channels.into_iter().zip(ids).enumerate() {
        if idx > 0 {
            parts.push((" ".to_string(), None));
        }
        parts.push((name.to_string(), None));
        parts.push((format!("{value:>3}"), Some(channel)));
    }
}

impl Drawable for ColorPicker {
    fn id(&self) -> &str {
        "color-picker"
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let (parts, _) = self.render_parts(true);
        DrawOutput::single(parts)
    }
}

impl Interactive for ColorPicker {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if let Some(result) = self.on_text_entry_key(key) {
            return result;
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            10
        } else {
            1
        };
        match key.code {
            KeyCode::Char('#') => {
                self.text_entry = Some("#".to_string());
                self.entry_base = Some((self.rgb, self.typed.clone()));
                InteractionResult::handled()
            }
            KeyCode::Char(' ') => {
                self.cycle_mode();
                InteractionResult::handled()
            }
            KeyCode::Left => {
                self.channel = self.channel.prev();
                self.reset_edit_buffer();
                InteractionResult::handled()
            }
            KeyCode::Right => {
                self.channel = self.channel.next();
                self.reset_edit_buffer();
                InteractionResult::handled()
            }
            KeyCode::Up => {
                self.adjust_channel(step);
                InteractionResult::handled()
            }
            KeyCode::Down => {
                self.adjust_channel(-step);
                InteractionResult::handled()
            }
            KeyCode::Backspace => {
                if self.handle_backspace() {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Char(ch) => {
                if self.handle_digit(ch) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.working_value()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.as_text()
            && let Some(rgb) = parse_hex(text)
        {
            self.rgb = rgb;
            self.typed = is_hex_color(text).then(|| text.to_string());
            self.text_entry = None;
            self.reset_edit_buffer();
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let (_, local) = self.render_parts(true);
        Some(CursorPos {
            col: local as u16,
            row: 0,
        })
    }
}

fn parse_hex_pair_prefix(value: &str) -> Option<u8> {
    let mut chars = value.chars();
    let hi = chars.next().and_then(hex_value)?;
    let lo = chars.next().and_then(hex_value)?;
    Some(hi * 16 + lo)
}

fn parse_hex_high_nibble(value: &str) -> Option<u8> {
    value.chars().next().and_then(hex_value).map(|hi| hi * 16)
}

fn parse_clamped(value: &str, max: i32) -> u16 {
    value.parse::<i32>().unwrap_or(0).clamp(0, max) as u16
}

#[cfg(test)]
mod tests {
    use super::ColorPicker;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::Interactive;

    fn press(picker: &mut ColorPicker, code: KeyCode) {
        picker.on_key(KeyEvent::plain(code));
    }

    fn type_text(picker: &mut ColorPicker, text: &str) {
        for ch in text.chars() {
            press(picker, KeyCode::Char(ch));
        }
    }

    #[test]
    fn untouched_picker_keeps_initial_text() {
        let picker = ColorPicker::new("#fff");
        assert_eq!(picker.working_value(), "#fff");
        assert_eq!(picker.rgb(), [255, 255, 255]);
    }

    #[test]
    fn typed_hex_is_kept_verbatim() {
        let mut picker = ColorPicker::new("#336699");
        type_text(&mut picker, "#112233");
        assert!(picker.is_typing());
        assert_eq!(picker.working_value(), "#112233");
        assert_eq!(picker.rgb(), [0x11, 0x22, 0x33]);

        let mut short = ColorPicker::new("#336699");
        type_text(&mut short, "#abc");
        assert_eq!(short.working_value(), "#abc");
    }

    #[test]
    fn incomplete_text_falls_back_to_last_valid_color() {
        let mut picker = ColorPicker::new("#336699");
        type_text(&mut picker, "#12");
        assert_eq!(picker.working_value(), "#336699");
    }

    #[test]
    fn overtyping_a_short_color_reverts_to_color_before_entry() {
        let mut picker = ColorPicker::new("#336699");
        type_text(&mut picker, "#112");
        assert_eq!(picker.working_value(), "#112");

        type_text(&mut picker, "23");
        assert_eq!(picker.working_value(), "#336699");
        assert_eq!(picker.rgb(), [0x33, 0x66, 0x99]);

        type_text(&mut picker, "3");
        assert_eq!(picker.working_value(), "#112233");
    }

    #[test]
    fn channel_edits_commit_uppercase_hex() {
        let mut picker = ColorPicker::new("#fff");
        press(&mut picker, KeyCode::Down);
        assert_eq!(picker.working_value(), "#FEFFFF");

        picker.on_key(KeyEvent {
            code: KeyCode::Down,
            modifiers: KeyModifiers::SHIFT,
        });
        assert_eq!(picker.working_value(), "#F4FFFF");
    }

    #[test]
    fn hex_digits_overwrite_active_channel() {
        let mut picker = ColorPicker::new("#000000");
        press(&mut picker, KeyCode::Right);
        type_text(&mut picker, "a5");
        assert_eq!(picker.working_value(), "#00A500");
    }

    #[test]
    fn rgb_mode_accepts_decimal_channels() {
        let mut picker = ColorPicker::new("#000000");
        press(&mut picker, KeyCode::Char(' '));
        type_text(&mut picker, "300");
        assert_eq!(picker.rgb(), [255, 0, 0]);
    }

    #[test]
    fn leaving_text_entry_resumes_channel_editing() {
        let mut picker = ColorPicker::new("#000000");
        type_text(&mut picker, "#10");
        press(&mut picker, KeyCode::Up);
        assert!(!picker.is_typing());
        assert_eq!(picker.working_value(), "#010000");
    }
}
