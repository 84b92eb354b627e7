pub mod ai;
pub mod controller;
pub mod tui;

pub use ai::RandomAI;
pub use controller::MovePolicy;
pub use tui::InputAction;
