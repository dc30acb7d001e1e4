// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::error::OSStatus;
use super::property_address::{AudioObjectID, PropertyAddress};

/// The property-addressed hardware service. Implementations forward each call
/// to the platform once and report its status unchanged.
pub trait AudioSystem {
    fn has_property(&self, id: AudioObjectID, address: &PropertyAddress) -> bool;

    fn get_property_data_size(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
    ) -> std::result::Result<usize, OSStatus>;

    /// Fills the front of `data` and returns the number of bytes written.
    fn get_property_data(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
        data: &mut [u8],
    ) -> std::result::Result<usize, OSStatus>;

    fn set_property_data(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
        data: &[u8],
    ) -> std::result::Result<(), OSStatus>;
}

#[cfg(target_os = "macos")]
pub use self::coreaudio::CoreAudioSystem;

#[cfg(target_os = "macos")]
mod coreaudio {
    use super::super::error::NO_ERR;
    use super::super::property_address::STRING_SELECTORS;
    use super::*;
    use coreaudio_sys_utils::sys::AudioObjectPropertyAddress;
    use coreaudio_sys_utils::*;
    use std::cmp;
    use std::os::raw::c_void;

    /// The system's HAL, reached through AudioObject{Has,Get,Set}Property*.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct CoreAudioSystem;

    fn sys_address(address: &PropertyAddress) -> AudioObjectPropertyAddress {
        AudioObjectPropertyAddress {
            mSelector: address.selector,
            mScope: address.scope.code(),
            mElement: address.element,
        }
    }

    // CFString properties are handed out as UTF-8 so that callers size and
    // fetch them like any other variable-length value.
    fn is_string_property(address: &PropertyAddress) -> bool {
        STRING_SELECTORS.contains(&address.selector)
    }

    impl AudioSystem for CoreAudioSystem {
        fn has_property(&self, id: AudioObjectID, address: &PropertyAddress) -> bool {
            audio_object_has_property(id, &sys_address(address))
        }

        fn get_property_data_size(
            &self,
            id: AudioObjectID,
            address: &PropertyAddress,
        ) -> std::result::Result<usize, OSStatus> {
            let adr = sys_address(address);
            if is_string_property(address) {
                return audio_object_get_property_string(id, &adr).map(|s| s.len());
            }
            let mut size: u32 = 0;
            let status = audio_object_get_property_data_size(id, &adr, &mut size);
            if status != NO_ERR {
                return Err(status);
            }
            Ok(size as usize)
        }

        fn get_property_data(
            &self,
            id: AudioObjectID,
            address: &PropertyAddress,
            data: &mut [u8],
        ) -> std::result::Result<usize, OSStatus> {
            let adr = sys_address(address);
            if is_string_property(address) {
                let string = audio_object_get_property_string(id, &adr)?;
                let len = cmp::min(string.len(), data.len());
                data[..len].copy_from_slice(&string.as_bytes()[..len]);
                return Ok(len);
            }
            let mut size = data.len() as u32;
            let status =
                audio_object_get_property_data(id, &adr, &mut size, data.as_mut_ptr() as *mut c_void);
            if status != NO_ERR {
                return Err(status);
            }
            Ok(size as usize)
        }

        fn set_property_data(
            &self,
            id: AudioObjectID,
            address: &PropertyAddress,
            data: &[u8],
        ) -> std::result::Result<(), OSStatus> {
            let status = audio_object_set_property_data(
                id,
                &sys_address(address),
                data.len() as u32,
                data.as_ptr() as *const c_void,
            );
            if status != NO_ERR {
                return Err(status);
            }
            Ok(())
        }
    }
}
