pub mod color;
pub mod swatch;
pub mod text;
pub mod text_edit;
pub mod toggle;
