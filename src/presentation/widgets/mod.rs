mod input;
mod status_bar;
mod submit_button;

pub use input::{TimeInput, TimeInputView};
pub use status_bar::{StatusBar, StatusPanel};
pub use submit_button::SubmitButton;
