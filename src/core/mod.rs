pub mod color;
pub mod document;
pub mod value;
pub mod value_path;
pub mod variant;
