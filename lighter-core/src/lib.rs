//! Lighter Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert nur Typen, Traits und Pure Functions (Frame-Encoding).

#![no_std]

extern crate alloc;

pub mod logic;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use logic::FrameEncoder;
pub use traits::{BusSetting, FrameTransport, LedError};
pub use types::{AnimationScript, AnimationStep, LedCommand, MAX_BRIGHTNESS, Pixel};

// RGB Farb-Typ, damit Nutzer nicht direkt von `rgb` abhängen müssen
pub use rgb::RGB8;
