//! UI-Layer mit egui: Viewport-Input, Tastatur, Optionen, Status-Bar.

pub mod input;
pub mod keyboard;
pub mod options_dialog;
pub mod status;

pub use input::InputState;
pub use keyboard::collect_keyboard_intents;
pub use options_dialog::show_options_panel;
pub use status::render_status_bar;
