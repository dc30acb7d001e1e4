use coreaudio_sys::*;
use std::os::raw::c_void;
use std::ptr;

use crate::string::cfstringref_into_string;

pub fn audio_object_has_property(id: AudioObjectID, address: &AudioObjectPropertyAddress) -> bool {
    unsafe { AudioObjectHasProperty(id, address) != 0 }
}

pub fn audio_object_get_property_data_size(
    id: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    size: &mut u32,
) -> OSStatus {
    unsafe { AudioObjectGetPropertyDataSize(id, address, 0, ptr::null(), size) }
}

// `size` carries the capacity of `data` in and the number of bytes written out.
pub fn audio_object_get_property_data(
    id: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    size: &mut u32,
    data: *mut c_void,
) -> OSStatus {
    unsafe { AudioObjectGetPropertyData(id, address, 0, ptr::null(), size, data) }
}

pub fn audio_object_set_property_data(
    id: AudioObjectID,
    address: &AudioObjectPropertyAddress,
    size: u32,
    data: *const c_void,
) -> OSStatus {
    unsafe { AudioObjectSetPropertyData(id, address, 0, ptr::null(), size, data) }
}

// Properties like kAudioObjectPropertyName hand out a retained CFStringRef that
// the caller owns. Copy it out as UTF-8 and release it.
pub fn audio_object_get_property_string(
    id: AudioObjectID,
    address: &AudioObjectPropertyAddress,
) -> Result<String, OSStatus> {
    let mut strref: CFStringRef = ptr::null();
    let mut size = std::mem::size_of::<CFStringRef>() as u32;
    let status = audio_object_get_property_data(
        id,
        address,
        &mut size,
        &mut strref as *mut CFStringRef as *mut c_void,
    );
    if status != 0 {
        return Err(status);
    }
    Ok(cfstringref_into_string(strref))
}
