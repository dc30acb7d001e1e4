// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::audio_system::AudioSystem;
use super::error::{Error, OSStatus, Result, BAD_PROPERTY_SIZE_ERR};
use super::property_address::{AudioObjectID, PropertyAddress};
use super::property_data::{decode_values, encode_value, PropertyData};
use super::utils::allocate_array;
use tracing::debug;

fn query_failed(call: &str, address: &PropertyAddress, status: OSStatus) -> Error {
    debug!("{}/{} rv={}", call, address, status);
    Error::QueryFailed(status)
}

/// Typed get/set/probe on top of any [`AudioSystem`].
///
/// Fixed-width values are fetched directly. Variable-length values (lists,
/// strings, buffer lists) are fetched in two steps: the data size is queried
/// first and then a buffer of exactly that size is filled.
pub trait PropertyAccessor: AudioSystem {
    /// Absence of a property is an ordinary answer, never an error.
    fn probe(&self, id: AudioObjectID, address: &PropertyAddress) -> bool {
        self.has_property(id, address)
    }

    fn read<T: PropertyData>(&self, id: AudioObjectID, address: &PropertyAddress) -> Result<T> {
        let mut data = allocate_array::<u8>(T::SIZE);
        let size = self
            .get_property_data(id, address, &mut data)
            .map_err(|status| query_failed("AudioObjectGetPropertyData", address, status))?;
        if size != T::SIZE {
            return Err(query_failed(
                "AudioObjectGetPropertyData",
                address,
                BAD_PROPERTY_SIZE_ERR,
            ));
        }
        Ok(T::decode(&data))
    }

    fn write<T: PropertyData>(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
        value: &T,
    ) -> Result<()> {
        self.set_property_data(id, address, &encode_value(value))
            .map_err(|status| query_failed("AudioObjectSetPropertyData", address, status))
    }

    fn read_bytes(&self, id: AudioObjectID, address: &PropertyAddress) -> Result<Vec<u8>> {
        let size = self
            .get_property_data_size(id, address)
            .map_err(|status| query_failed("AudioObjectGetPropertyDataSize", address, status))?;
        let mut data = allocate_array::<u8>(size);
        if size == 0 {
            return Ok(data);
        }
        let written = self
            .get_property_data(id, address, &mut data)
            .map_err(|status| query_failed("AudioObjectGetPropertyData", address, status))?;
        data.truncate(written);
        Ok(data)
    }

    fn read_array<T: PropertyData>(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
    ) -> Result<Vec<T>> {
        self.read_bytes(id, address)
            .map(|bytes| decode_values::<T>(&bytes))
    }

    fn read_string(&self, id: AudioObjectID, address: &PropertyAddress) -> Result<String> {
        self.read_bytes(id, address)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<S: AudioSystem + ?Sized> PropertyAccessor for S {}
