// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::audio_system::AudioSystem;
use super::device_property::PropertyAccessor;
use super::error::Result;
use super::property_address::*;
use super::property_data::buffer_list_channels;

/// An output-capable audio device as seen at enumeration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    pub id: AudioDeviceID,
    pub name: String,
    pub output_channels: u32,
}

impl Device {
    pub fn is_output(&self) -> bool {
        self.output_channels > 0
    }
}

/// Device discovery. Nothing is cached: every call asks the platform again,
/// since devices and the default device can change at any time.
pub struct DeviceRegistry<'a, S: ?Sized> {
    system: &'a S,
}

impl<'a, S: AudioSystem + ?Sized> DeviceRegistry<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    /// Devices with at least one output channel, in platform order.
    pub fn all_output_devices(&self) -> Result<Vec<Device>> {
        let devices: Vec<AudioObjectID> = self
            .system
            .read_array(SYSTEM_OBJECT, &DEVICES_PROPERTY_ADDRESS)?;

        let mut outputs = Vec::new();
        for id in devices {
            let output_channels = self.output_channel_count(id);
            if output_channels == 0 {
                continue;
            }
            outputs.push(Device {
                id,
                name: self.device_name(id)?,
                output_channels,
            });
        }
        Ok(outputs)
    }

    pub fn default_output_device_id(&self) -> Result<AudioDeviceID> {
        self.system
            .read::<AudioObjectID>(SYSTEM_OBJECT, &DEFAULT_OUTPUT_DEVICE_PROPERTY_ADDRESS)
    }

    pub fn device_name(&self, id: AudioDeviceID) -> Result<String> {
        self.system.read_string(id, &NAME_PROPERTY_ADDRESS)
    }

    // Sum of mNumberChannels over the output stream configuration. A device
    // whose configuration can't be read counts as having no output.
    pub fn output_channel_count(&self, id: AudioDeviceID) -> u32 {
        self.system
            .read_bytes(id, &OUTPUT_STREAM_CONFIGURATION_PROPERTY_ADDRESS)
            .map(|bytes| {
                buffer_list_channels(&bytes)
                    .iter()
                    .fold(0u32, |total, &channels| total.saturating_add(channels))
            })
            .unwrap_or(0)
    }
}
