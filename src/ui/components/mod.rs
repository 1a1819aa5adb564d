pub mod form;
pub mod popup;
pub mod selector;
pub mod text_input;
