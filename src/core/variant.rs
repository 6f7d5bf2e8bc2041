use crate::core::color::is_hex_color;
use crate::core::value::Value;

/// How a document node is presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    ObjectGroup,
    ColorArray,
    GenericArray,
    HexColor,
    Boolean,
    Scalar,
    Unsupported,
}

/// Pick the presentation for `value`. `None` values are not rendered.
///
/// First match wins, so the color variants shadow their generic
/// counterparts. An empty list is a `GenericArray`.
pub fn classify(value: &Value) -> Option<Variant> {
    let variant = match value {
        Value::None => return None,
        Value::Object(_) => Variant::ObjectGroup,
        Value::List(items) if !items.is_empty() && items.iter().all(is_color_text) => {
            Variant::ColorArray
        }
        Value::List(_) => Variant::GenericArray,
        Value::Text(text) if is_hex_color(text) => Variant::HexColor,
        Value::Bool(_) => Variant::Boolean,
        Value::Text(_) | Value::Number(_) => Variant::Scalar,
    };
    Some(variant)
}

fn is_color_text(value: &Value) -> bool {
    value.as_text().is_some_and(is_hex_color)
}
