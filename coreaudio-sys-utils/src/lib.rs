extern crate coreaudio_sys;
extern crate core_foundation_sys;
extern crate libc;

pub mod audio_object;
pub mod display;
pub mod string;

pub use audio_object::*;
pub use display::*;
pub use string::*;
// Re-export coreaudio-sys types
pub use coreaudio_sys as sys;
