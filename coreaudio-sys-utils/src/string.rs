use coreaudio_sys::*;
use core_foundation_sys::base::CFRelease;
use std::os::raw::{c_char, c_void};

// Takes ownership of `strref`: it is released before returning.
pub fn cfstringref_into_string(strref: CFStringRef) -> String {
    if strref.is_null() {
        return String::new();
    }
    let string = cfstringref_to_string(strref);
    unsafe {
        CFRelease(strref as *const c_void);
    }
    string
}

pub fn cfstringref_to_string(strref: CFStringRef) -> String {
    if strref.is_null() {
        return String::new();
    }

    let len = unsafe { CFStringGetLength(strref) };
    // Add 1 to size to allow for '\0' termination character.
    let size = unsafe { CFStringGetMaximumSizeForEncoding(len, kCFStringEncodingUTF8) + 1 };
    let mut buffer = vec![b'\x00'; size as usize];

    let success = unsafe {
        CFStringGetCString(
            strref,
            buffer.as_mut_ptr() as *mut c_char,
            size,
            kCFStringEncodingUTF8,
        ) != 0
    };
    if !success {
        return String::new();
    }

    // The size returned from CFStringGetMaximumSizeForEncoding is an upper
    // bound, so shrink the buffer to the bytes before the nul-terminator.
    let str_len = unsafe { libc::strlen(buffer.as_ptr() as *const c_char) };
    buffer.truncate(str_len);

    String::from_utf8_lossy(&buffer).into_owned()
}

#[test]
fn test_cfstringref_to_string() {
    let test_string = "Rustaceans 🦀";
    let strref = unsafe {
        CFStringCreateWithBytes(
            kCFAllocatorDefault,
            test_string.as_ptr(),
            test_string.len() as CFIndex,
            kCFStringEncodingUTF8,
            false as Boolean,
        )
    };
    assert_eq!(cfstringref_into_string(strref), test_string);
}

#[test]
fn test_null_cfstringref_is_empty() {
    assert!(cfstringref_to_string(std::ptr::null()).is_empty());
}
