pub mod dismiss;
pub mod floating;
pub mod text_input;
pub mod ui;
