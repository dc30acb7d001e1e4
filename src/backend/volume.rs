// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::audio_system::AudioSystem;
use super::device_property::PropertyAccessor;
use super::error::Result;
use super::property_address::{output_volume_property_address, AudioDeviceID, PropertyElement};

pub const LEFT_CHANNEL: PropertyElement = 1;
pub const RIGHT_CHANNEL: PropertyElement = 2;

/// Per-channel linear volume (0..1) through the virtual main volume control.
/// There is only one control, so failures surface as they are.
pub struct VolumeController<'a, S: ?Sized> {
    system: &'a S,
}

impl<'a, S: AudioSystem + ?Sized> VolumeController<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    pub fn get_volume(&self, id: AudioDeviceID, channel: PropertyElement) -> Result<f32> {
        self.system
            .read::<f32>(id, &output_volume_property_address(channel))
    }

    pub fn set_volume(&self, id: AudioDeviceID, channel: PropertyElement, value: f32) -> Result<()> {
        self.system
            .write(id, &output_volume_property_address(channel), &value)
    }
}
