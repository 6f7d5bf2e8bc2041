pub mod base;
pub mod components;
pub mod form;
pub mod inputs;
pub mod traits;
