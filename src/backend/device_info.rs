// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::audio_system::AudioSystem;
use super::balance::{BalanceController, DEFAULT_BALANCE};
use super::device_property::PropertyAccessor;
use super::device_registry::DeviceRegistry;
use super::error::{Error, Result, BAD_OBJECT_ERR};
use super::property_address::*;
use super::property_data::{StereoChannels, ValueRange};
use super::volume::{VolumeController, LEFT_CHANNEL, RIGHT_CHANNEL};
use std::fmt;
use std::iter;
use tracing::warn;

pub const DEFAULT_CHANNEL_COUNT: u32 = 2;

pub const TRANSPORT_TYPE_BUILT_IN: u32 = fourcc(b"bltn");
pub const TRANSPORT_TYPE_AGGREGATE: u32 = fourcc(b"grup");
pub const TRANSPORT_TYPE_USB: u32 = fourcc(b"usb ");
pub const TRANSPORT_TYPE_BLUETOOTH: u32 = fourcc(b"blue");
pub const TRANSPORT_TYPE_HDMI: u32 = fourcc(b"hdmi");
pub const TRANSPORT_TYPE_DISPLAY_PORT: u32 = fourcc(b"dprt");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportType {
    BuiltIn,
    Aggregate,
    Usb,
    Bluetooth,
    Hdmi,
    DisplayPort,
    Other,
}

impl TransportType {
    pub fn label(self) -> &'static str {
        match self {
            TransportType::BuiltIn => "Built-in",
            TransportType::Aggregate => "Aggregate",
            TransportType::Usb => "USB",
            TransportType::Bluetooth => "Bluetooth",
            TransportType::Hdmi => "HDMI",
            TransportType::DisplayPort => "DisplayPort",
            TransportType::Other => "Other",
        }
    }
}

impl From<u32> for TransportType {
    fn from(code: u32) -> Self {
        match code {
            TRANSPORT_TYPE_BUILT_IN => TransportType::BuiltIn,
            TRANSPORT_TYPE_AGGREGATE => TransportType::Aggregate,
            TRANSPORT_TYPE_USB => TransportType::Usb,
            TRANSPORT_TYPE_BLUETOOTH => TransportType::Bluetooth,
            TRANSPORT_TYPE_HDMI => TransportType::Hdmi,
            TRANSPORT_TYPE_DISPLAY_PORT => TransportType::DisplayPort,
            _ => TransportType::Other,
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of an output device, built fresh for every request.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceDescriptor {
    pub id: AudioDeviceID,
    pub name: String,
    pub manufacturer: String,
    pub channels: u32,
    pub sample_rates: Vec<f64>,
    pub left_volume: f32,
    pub right_volume: f32,
    pub balance: f32,
    pub muted: bool,
    pub transport: TransportType,
}

// Secondary fields never fail the descriptor: a failed read is logged and
// replaced by the field's default.
fn best_effort<T>(id: AudioDeviceID, field: &str, result: Result<T>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("Device {}: {} unavailable ({}), using default", id, field, e);
            default
        }
    }
}

// Every range contributes its bounds; zero entries carry no rate.
fn flatten_sample_rates(ranges: &[ValueRange]) -> Vec<f64> {
    ranges
        .iter()
        .flat_map(|range| iter::once(range.minimum).chain(iter::once(range.maximum)))
        .filter(|rate| *rate > 0.0)
        .collect()
}

pub struct DeviceInfoAggregator<'a, S: ?Sized> {
    system: &'a S,
}

impl<'a, S: AudioSystem + ?Sized> DeviceInfoAggregator<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    pub fn describe_default(&self) -> Result<DeviceDescriptor> {
        let id = DeviceRegistry::new(self.system).default_output_device_id()?;
        self.describe(id)
    }

    /// Fails only when `id` can't name a device: the unknown object, or an
    /// id the platform has no object for.
    pub fn describe(&self, id: AudioDeviceID) -> Result<DeviceDescriptor> {
        // Required. Every live audio object carries a name property.
        if id == UNKNOWN_OBJECT || !self.system.probe(id, &NAME_PROPERTY_ADDRESS) {
            return Err(Error::QueryFailed(BAD_OBJECT_ERR));
        }

        // Best effort.
        let system = self.system;
        let volume = VolumeController::new(system);
        let balance_controller = BalanceController::new(system);

        let name = best_effort(
            id,
            "name",
            system.read_string(id, &NAME_PROPERTY_ADDRESS),
            String::new(),
        );
        let manufacturer = best_effort(
            id,
            "manufacturer",
            system.read_string(id, &MANUFACTURER_PROPERTY_ADDRESS),
            String::new(),
        );
        // The right channel's number of the preferred stereo pair.
        let channels = best_effort(
            id,
            "preferred stereo channels",
            system
                .read::<StereoChannels>(id, &OUTPUT_PREFERRED_STEREO_CHANNELS_PROPERTY_ADDRESS)
                .map(|stereo| stereo.right),
            DEFAULT_CHANNEL_COUNT,
        );
        let sample_rates = best_effort(
            id,
            "sample rates",
            system
                .read_array::<ValueRange>(id, &OUTPUT_AVAILABLE_SAMPLE_RATES_PROPERTY_ADDRESS)
                .map(|ranges| flatten_sample_rates(&ranges)),
            Vec::new(),
        );
        let left_volume = best_effort(id, "left volume", volume.get_volume(id, LEFT_CHANNEL), 0.0);
        let right_volume = best_effort(id, "right volume", volume.get_volume(id, RIGHT_CHANNEL), 0.0);
        let balance = best_effort(id, "balance", balance_controller.get_balance(id), DEFAULT_BALANCE);
        let muted = best_effort(
            id,
            "mute",
            system
                .read::<u32>(id, &OUTPUT_MUTE_PROPERTY_ADDRESS)
                .map(|muted| muted != 0),
            false,
        );
        let transport = best_effort(
            id,
            "transport type",
            system
                .read::<u32>(id, &TRANSPORT_TYPE_PROPERTY_ADDRESS)
                .map(TransportType::from),
            TransportType::Other,
        );

        Ok(DeviceDescriptor {
            id,
            name,
            manufacturer,
            channels,
            sample_rates,
            left_volume,
            right_volume,
            balance,
            muted,
            transport,
        })
    }
}

#[test]
fn test_flatten_sample_rates() {
    let ranges = [
        ValueRange {
            minimum: 44_100.0,
            maximum: 44_100.0,
        },
        ValueRange {
            minimum: 0.0,
            maximum: 96_000.0,
        },
    ];
    assert_eq!(flatten_sample_rates(&ranges), vec![44_100.0, 44_100.0, 96_000.0]);
    assert!(flatten_sample_rates(&[]).is_empty());
}
