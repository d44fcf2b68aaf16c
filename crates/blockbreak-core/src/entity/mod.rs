pub mod animation;
pub mod character;
pub mod hotbar;
pub mod input;

pub use animation::Animation;
pub use character::{Character, PhysicsParams};
pub use hotbar::Hotbar;
pub use input::{InputState, Keys, MouseButtons};
