// Task-Modul: Hintergrund-Animationen
//
// Höchstens ein Animations-Thread läuft gleichzeitig; der Controller
// besitzt das Handle exklusiv.

pub mod flash_bang;

// Re-export für einfachen Import
pub use flash_bang::{AnimationController, AnimationState, CommandError, run_script};
