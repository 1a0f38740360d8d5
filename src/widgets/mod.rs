//! Built-in widgets: Panel, Label, Button, Slider, TextInput.

pub mod button;
pub mod label;
pub mod panel;
pub mod slider;
pub mod text_input;

pub use button::Button;
pub use label::Label;
pub use panel::Panel;
pub use slider::Slider;
pub use text_input::TextInput;
