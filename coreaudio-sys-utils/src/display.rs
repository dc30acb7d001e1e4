// Quartz Display Services, which coreaudio-sys does not generate bindings for.
#![allow(non_upper_case_globals, non_camel_case_types)]

use std::os::raw::c_void;
use std::ptr;

pub type CGDirectDisplayID = u32;
pub type CGError = i32;
pub type CGDisplayConfigRef = *mut c_void;
pub type CGConfigureOption = u32;
type boolean_t = i32;

pub const kCGErrorSuccess: CGError = 0;
pub const kCGNullDirectDisplay: CGDirectDisplayID = 0;
pub const kCGConfigureForAppOnly: CGConfigureOption = 0;
pub const kCGConfigureForSession: CGConfigureOption = 1;
pub const kCGConfigurePermanently: CGConfigureOption = 2;

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGGetOnlineDisplayList(
        max_displays: u32,
        online_displays: *mut CGDirectDisplayID,
        display_count: *mut u32,
    ) -> CGError;
    fn CGDisplayIsBuiltin(display: CGDirectDisplayID) -> boolean_t;
    fn CGDisplayIsMain(display: CGDirectDisplayID) -> boolean_t;
    fn CGDisplayIsActive(display: CGDirectDisplayID) -> boolean_t;
    fn CGDisplayPixelsWide(display: CGDirectDisplayID) -> usize;
    fn CGDisplayPixelsHigh(display: CGDirectDisplayID) -> usize;
    fn CGBeginDisplayConfiguration(config: *mut CGDisplayConfigRef) -> CGError;
    fn CGConfigureDisplayMirrorOfDisplay(
        config: CGDisplayConfigRef,
        display: CGDirectDisplayID,
        master: CGDirectDisplayID,
    ) -> CGError;
    fn CGCompleteDisplayConfiguration(
        config: CGDisplayConfigRef,
        option: CGConfigureOption,
    ) -> CGError;
    fn CGCancelDisplayConfiguration(config: CGDisplayConfigRef) -> CGError;
}

// Fills `displays` from the front and returns how many entries were written.
pub fn cg_get_online_display_list(displays: &mut [CGDirectDisplayID]) -> Result<usize, CGError> {
    let mut count: u32 = 0;
    let err = unsafe {
        CGGetOnlineDisplayList(displays.len() as u32, displays.as_mut_ptr(), &mut count)
    };
    if err != kCGErrorSuccess {
        return Err(err);
    }
    Ok(count as usize)
}

pub fn cg_display_is_builtin(display: CGDirectDisplayID) -> bool {
    unsafe { CGDisplayIsBuiltin(display) != 0 }
}

pub fn cg_display_is_main(display: CGDirectDisplayID) -> bool {
    unsafe { CGDisplayIsMain(display) != 0 }
}

pub fn cg_display_is_active(display: CGDirectDisplayID) -> bool {
    unsafe { CGDisplayIsActive(display) != 0 }
}

pub fn cg_display_pixels(display: CGDirectDisplayID) -> (usize, usize) {
    unsafe { (CGDisplayPixelsWide(display), CGDisplayPixelsHigh(display)) }
}

pub fn cg_begin_display_configuration() -> Result<CGDisplayConfigRef, CGError> {
    let mut config: CGDisplayConfigRef = ptr::null_mut();
    let err = unsafe { CGBeginDisplayConfiguration(&mut config) };
    if err != kCGErrorSuccess {
        return Err(err);
    }
    Ok(config)
}

pub fn cg_configure_display_mirror_of_display(
    config: CGDisplayConfigRef,
    display: CGDirectDisplayID,
    master: CGDirectDisplayID,
) -> CGError {
    unsafe { CGConfigureDisplayMirrorOfDisplay(config, display, master) }
}

pub fn cg_complete_display_configuration(
    config: CGDisplayConfigRef,
    option: CGConfigureOption,
) -> CGError {
    unsafe { CGCompleteDisplayConfiguration(config, option) }
}

pub fn cg_cancel_display_configuration(config: CGDisplayConfigRef) -> CGError {
    unsafe { CGCancelDisplayConfiguration(config) }
}
