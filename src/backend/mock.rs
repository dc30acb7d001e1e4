// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

//! In-memory platforms for exercising the control layer without hardware.

use super::audio_system::AudioSystem;
use super::display::{CGError, ConfigureOption, DisplayBackend, DisplayId, NULL_DISPLAY};
use super::error::{OSStatus, UNKNOWN_PROPERTY_ERR};
use super::property_address::*;
use super::property_data::{decode_values, encode_buffer_list, encode_value, encode_values, PropertyData};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

type PropertyKey = (AudioObjectID, PropertyAddress);

#[derive(Debug, Default)]
struct AudioState {
    properties: HashMap<PropertyKey, Vec<u8>>,
    failures: HashMap<PropertyKey, OSStatus>,
    writes: HashMap<PropertyKey, usize>,
}

/// A property store keyed by (object, address). Properties only exist once
/// they are inserted; writes to a missing property fail like they would on a
/// device that lacks the control.
#[derive(Debug, Default)]
pub struct MockAudioSystem {
    state: Mutex<AudioState>,
}

impl MockAudioSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<AudioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_bytes(&self, id: AudioObjectID, address: &PropertyAddress, bytes: Vec<u8>) {
        self.state().properties.insert((id, *address), bytes);
    }

    pub fn set<T: PropertyData>(&self, id: AudioObjectID, address: &PropertyAddress, value: T) {
        self.set_bytes(id, address, encode_value(&value));
    }

    pub fn set_array<T: PropertyData>(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
        values: &[T],
    ) {
        self.set_bytes(id, address, encode_values(values));
    }

    pub fn set_string(&self, id: AudioObjectID, address: &PropertyAddress, value: &str) {
        self.set_bytes(id, address, value.as_bytes().to_vec());
    }

    pub fn remove(&self, id: AudioObjectID, address: &PropertyAddress) {
        self.state().properties.remove(&(id, *address));
    }

    /// Every later get or set on the property returns `status`. The property
    /// still probes as present if it was inserted.
    pub fn fail(&self, id: AudioObjectID, address: &PropertyAddress, status: OSStatus) {
        self.state().failures.insert((id, *address), status);
    }

    pub fn value<T: PropertyData>(&self, id: AudioObjectID, address: &PropertyAddress) -> Option<T> {
        self.state()
            .properties
            .get(&(id, *address))
            .filter(|bytes| bytes.len() == T::SIZE)
            .map(|bytes| T::decode(bytes))
    }

    pub fn write_count(&self, id: AudioObjectID, address: &PropertyAddress) -> usize {
        self.state()
            .writes
            .get(&(id, *address))
            .cloned()
            .unwrap_or(0)
    }

    /// Appends `id` to the system device list with a name and one output
    /// stream per entry of `stream_channels`.
    pub fn add_device(&self, id: AudioDeviceID, name: &str, stream_channels: &[u32]) {
        let mut devices: Vec<AudioObjectID> = {
            let state = self.state();
            state
                .properties
                .get(&(SYSTEM_OBJECT, DEVICES_PROPERTY_ADDRESS))
                .map(|bytes| decode_values(bytes))
                .unwrap_or_default()
        };
        devices.push(id);
        self.set_array(SYSTEM_OBJECT, &DEVICES_PROPERTY_ADDRESS, &devices);
        self.set_string(id, &NAME_PROPERTY_ADDRESS, name);
        self.set_bytes(
            id,
            &OUTPUT_STREAM_CONFIGURATION_PROPERTY_ADDRESS,
            encode_buffer_list(stream_channels),
        );
    }

    pub fn set_default_output_device(&self, id: AudioDeviceID) {
        self.set(SYSTEM_OBJECT, &DEFAULT_OUTPUT_DEVICE_PROPERTY_ADDRESS, id);
    }

    fn check_failure(&self, key: &PropertyKey) -> std::result::Result<(), OSStatus> {
        match self.state().failures.get(key) {
            Some(&status) => Err(status),
            None => Ok(()),
        }
    }
}

impl AudioSystem for MockAudioSystem {
    fn has_property(&self, id: AudioObjectID, address: &PropertyAddress) -> bool {
        self.state().properties.contains_key(&(id, *address))
    }

    fn get_property_data_size(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
    ) -> std::result::Result<usize, OSStatus> {
        let key = (id, *address);
        self.check_failure(&key)?;
        self.state()
            .properties
            .get(&key)
            .map(|bytes| bytes.len())
            .ok_or(UNKNOWN_PROPERTY_ERR)
    }

    fn get_property_data(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
        data: &mut [u8],
    ) -> std::result::Result<usize, OSStatus> {
        let key = (id, *address);
        self.check_failure(&key)?;
        let state = self.state();
        let bytes = state.properties.get(&key).ok_or(UNKNOWN_PROPERTY_ERR)?;
        let len = bytes.len().min(data.len());
        data[..len].copy_from_slice(&bytes[..len]);
        Ok(len)
    }

    fn set_property_data(
        &self,
        id: AudioObjectID,
        address: &PropertyAddress,
        data: &[u8],
    ) -> std::result::Result<(), OSStatus> {
        let key = (id, *address);
        self.check_failure(&key)?;
        let mut state = self.state();
        match state.properties.get_mut(&key) {
            Some(bytes) => *bytes = data.to_vec(),
            None => return Err(UNKNOWN_PROPERTY_ERR),
        }
        *state.writes.entry(key).or_insert(0) += 1;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockDisplay {
    pub id: DisplayId,
    pub builtin: bool,
    pub main: bool,
    pub active: bool,
    pub width: usize,
    pub height: usize,
}

impl MockDisplay {
    pub fn new(id: DisplayId) -> Self {
        Self {
            id,
            builtin: false,
            main: false,
            active: true,
            width: 1920,
            height: 1080,
        }
    }

    pub fn builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn main(mut self) -> Self {
        self.main = true;
        self
    }
}

/// Calls made against [`MockDisplays`] configuration transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigEvent {
    Begin(usize),
    Mirror {
        config: usize,
        display: DisplayId,
        master: DisplayId,
    },
    Complete {
        config: usize,
        option: ConfigureOption,
    },
    Cancel(usize),
}

#[derive(Debug, Default)]
struct DisplayState {
    displays: Vec<MockDisplay>,
    list_error: Option<CGError>,
    mirror_error: Option<CGError>,
    complete_error: Option<CGError>,
    next_config: usize,
    pending: HashMap<usize, Vec<(DisplayId, DisplayId)>>,
    events: Vec<ConfigEvent>,
}

#[derive(Debug, Default)]
pub struct MockDisplays {
    state: Mutex<DisplayState>,
}

impl MockDisplays {
    pub fn new(displays: Vec<MockDisplay>) -> Self {
        Self {
            state: Mutex::new(DisplayState {
                displays,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<DisplayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fail_list(&self, err: CGError) {
        self.state().list_error = Some(err);
    }

    pub fn fail_mirror(&self, err: CGError) {
        self.state().mirror_error = Some(err);
    }

    pub fn fail_complete(&self, err: CGError) {
        self.state().complete_error = Some(err);
    }

    pub fn events(&self) -> Vec<ConfigEvent> {
        self.state().events.clone()
    }

    pub fn display(&self, id: DisplayId) -> Option<MockDisplay> {
        self.state().displays.iter().find(|d| d.id == id).cloned()
    }
}

impl DisplayBackend for MockDisplays {
    type Config = usize;

    fn online_display_list(&self, displays: &mut [DisplayId]) -> std::result::Result<usize, CGError> {
        let state = self.state();
        if let Some(err) = state.list_error {
            return Err(err);
        }
        let count = state.displays.len().min(displays.len());
        for (slot, display) in displays.iter_mut().zip(&state.displays) {
            *slot = display.id;
        }
        Ok(count)
    }

    fn is_builtin(&self, id: DisplayId) -> bool {
        self.display(id).map_or(false, |d| d.builtin)
    }

    fn is_main(&self, id: DisplayId) -> bool {
        self.display(id).map_or(false, |d| d.main)
    }

    fn is_active(&self, id: DisplayId) -> bool {
        self.display(id).map_or(false, |d| d.active)
    }

    fn pixels(&self, id: DisplayId) -> (usize, usize) {
        self.display(id).map_or((0, 0), |d| (d.width, d.height))
    }

    fn begin_configuration(&self) -> std::result::Result<usize, CGError> {
        let mut state = self.state();
        let config = state.next_config;
        state.next_config += 1;
        state.pending.insert(config, Vec::new());
        state.events.push(ConfigEvent::Begin(config));
        Ok(config)
    }

    fn configure_mirror_of_display(
        &self,
        config: &usize,
        display: DisplayId,
        master: DisplayId,
    ) -> std::result::Result<(), CGError> {
        let mut state = self.state();
        state.events.push(ConfigEvent::Mirror {
            config: *config,
            display,
            master,
        });
        if let Some(err) = state.mirror_error {
            return Err(err);
        }
        state
            .pending
            .entry(*config)
            .or_insert_with(Vec::new)
            .push((display, master));
        Ok(())
    }

    fn complete_configuration(
        &self,
        config: usize,
        option: ConfigureOption,
    ) -> std::result::Result<(), CGError> {
        let mut state = self.state();
        state.events.push(ConfigEvent::Complete { config, option });
        let changes = state.pending.remove(&config).unwrap_or_default();
        if let Some(err) = state.complete_error {
            return Err(err);
        }
        // Mirroring nothing takes the display off the desktop.
        for (display, master) in changes {
            if master == NULL_DISPLAY {
                if let Some(d) = state.displays.iter_mut().find(|d| d.id == display) {
                    d.active = false;
                }
            }
        }
        Ok(())
    }

    fn cancel_configuration(&self, config: usize) {
        let mut state = self.state();
        state.pending.remove(&config);
        state.events.push(ConfigEvent::Cancel(config));
    }
}
