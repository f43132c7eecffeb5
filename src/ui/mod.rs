pub mod panel;
pub mod style;

pub use panel::Panel;
