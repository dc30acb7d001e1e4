// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

//! The synchronous entry points used by the command line, the menu bar and
//! shortcut integrations. Results are plain data; rendering them is up to
//! the caller.

use crate::backend::*;
use tracing::{info, warn};

fn parse_id(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).ok();
    }
    trimmed.parse::<u32>().ok()
}

/// Accepts decimal or `0x`-prefixed hexadecimal.
pub fn parse_device_id(input: &str) -> Result<AudioDeviceID> {
    parse_id(input).ok_or_else(|| Error::InvalidIdentifier(input.to_owned()))
}

/// Accepts `0x`/`0X`-prefixed hexadecimal, as displays are usually listed,
/// or decimal.
pub fn parse_display_id(input: &str) -> Result<DisplayId> {
    parse_id(input).ok_or_else(|| Error::InvalidIdentifier(input.to_owned()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalancePreset {
    Left,
    Center,
    Right,
}

impl BalancePreset {
    pub fn value(self) -> f32 {
        match self {
            BalancePreset::Left => 0.0,
            BalancePreset::Center => 0.5,
            BalancePreset::Right => 1.0,
        }
    }

    pub fn from_value(value: f32) -> Option<Self> {
        [BalancePreset::Left, BalancePreset::Center, BalancePreset::Right]
            .iter()
            .cloned()
            .find(|preset| approx_eq!(f32, preset.value(), value))
    }
}

/// Offset from center in whole percent, 100 being fully to one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalancePosition {
    Left(u32),
    Center,
    Right(u32),
}

impl BalancePosition {
    pub fn from_balance(balance: f32) -> Self {
        let percent = ((balance - 0.5) * 200.0) as i32;
        if percent < 0 {
            BalancePosition::Left(percent.unsigned_abs())
        } else if percent > 0 {
            BalancePosition::Right(percent as u32)
        } else {
            BalancePosition::Center
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceReading {
    pub value: f32,
    pub position: BalancePosition,
}

impl BalanceReading {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            position: BalancePosition::from_balance(value),
        }
    }

    pub fn preset(&self) -> Option<BalancePreset> {
        BalancePreset::from_value(self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDevice {
    pub device: Device,
    pub is_default: bool,
}

/// Audio operations, applied to the current default output device unless a
/// device is named.
pub struct AudioService<'a, S: ?Sized> {
    system: &'a S,
}

impl<'a, S: AudioSystem + ?Sized> AudioService<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    fn default_device(&self) -> Result<AudioDeviceID> {
        DeviceRegistry::new(self.system).default_output_device_id()
    }

    pub fn list_output_devices(&self) -> Result<Vec<OutputDevice>> {
        let registry = DeviceRegistry::new(self.system);
        let devices = registry.all_output_devices()?;
        let default = registry.default_output_device_id().ok();
        Ok(devices
            .into_iter()
            .map(|device| OutputDevice {
                is_default: Some(device.id) == default,
                device,
            })
            .collect())
    }

    pub fn device_info(&self, id: &str) -> Result<DeviceDescriptor> {
        let id = parse_device_id(id)?;
        DeviceInfoAggregator::new(self.system).describe(id)
    }

    pub fn default_device_info(&self) -> Result<DeviceDescriptor> {
        DeviceInfoAggregator::new(self.system).describe_default()
    }

    pub fn balance_controls(&self) -> Result<BalanceControls> {
        let id = self.default_device()?;
        Ok(BalanceController::new(self.system).controls(id))
    }

    pub fn current_balance(&self) -> Result<BalanceReading> {
        let id = self.default_device()?;
        let value = BalanceController::new(self.system).get_balance(id)?;
        Ok(BalanceReading::new(value))
    }

    /// Clamps `value` into [0, 1] and returns what was applied.
    pub fn set_balance(&self, value: f32) -> Result<f32> {
        let value = if value.is_nan() {
            BalancePreset::Center.value()
        } else {
            value.max(0.0).min(1.0)
        };
        let id = self.default_device()?;
        BalanceController::new(self.system).set_balance(id, value)?;
        match BalancePreset::from_value(value) {
            Some(preset) => info!("Audio balance set to {:?}", preset),
            None => info!("Audio balance set to {}%", (value * 100.0) as u32),
        }
        Ok(value)
    }

    pub fn apply_preset(&self, preset: BalancePreset) -> Result<f32> {
        self.set_balance(preset.value())
    }

    pub fn balance_left(&self) -> Result<f32> {
        self.apply_preset(BalancePreset::Left)
    }

    pub fn balance_center(&self) -> Result<f32> {
        self.apply_preset(BalancePreset::Center)
    }

    pub fn balance_right(&self) -> Result<f32> {
        self.apply_preset(BalancePreset::Right)
    }

    pub fn volume(&self, channel: PropertyElement) -> Result<f32> {
        let id = self.default_device()?;
        VolumeController::new(self.system).get_volume(id, channel)
    }

    pub fn set_volume(&self, channel: PropertyElement, value: f32) -> Result<()> {
        let id = self.default_device()?;
        VolumeController::new(self.system).set_volume(id, channel, value)
    }
}

pub struct DisplayService<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: DisplayBackend + ?Sized> DisplayService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> Result<Vec<Display>> {
        DisplayRegistry::new(self.backend).all()
    }

    pub fn turn_off(&self, id: &str) -> Result<DisplayId> {
        let id = parse_display_id(id)?;
        DisplayRegistry::new(self.backend).deactivate(id)?;
        info!("Display {:#x} has been turned off", id);
        Ok(id)
    }

    /// Tries a DDC power-off first and falls back to session deactivation.
    pub fn turn_off_with_ddc(&self, id: &str) -> Result<DisplayId> {
        let display_id = parse_display_id(id)?;
        let registry = DisplayRegistry::new(self.backend);
        match registry.ddc_power_off(display_id) {
            Ok(()) => Ok(display_id),
            Err(e) => {
                warn!(
                    "DDC power-off of display {:#x} unavailable ({}), deactivating instead",
                    display_id, e
                );
                self.turn_off(id)
            }
        }
    }
}

#[cfg(target_os = "macos")]
static CORE_AUDIO: CoreAudioSystem = CoreAudioSystem;

#[cfg(target_os = "macos")]
static CORE_GRAPHICS: CoreGraphicsDisplays = CoreGraphicsDisplays;

#[cfg(target_os = "macos")]
pub fn system_audio_service() -> AudioService<'static, CoreAudioSystem> {
    AudioService::new(&CORE_AUDIO)
}

#[cfg(target_os = "macos")]
pub fn system_display_service() -> DisplayService<'static, CoreGraphicsDisplays> {
    DisplayService::new(&CORE_GRAPHICS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_device(system: &MockAudioSystem, id: AudioDeviceID, name: &str) {
        system.add_device(id, name, &[2]);
        system.set(id, &OUTPUT_STEREO_PAN_PROPERTY_ADDRESS, 0.5f32);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_display_id("0x1A2B"), Ok(0x1a2b));
        assert_eq!(parse_display_id(" 0X1a2b\n"), Ok(0x1a2b));
        assert_eq!(parse_display_id("42"), Ok(42));
        assert_eq!(parse_device_id("73"), Ok(73));
        assert_eq!(
            parse_display_id("0xZZ"),
            Err(Error::InvalidIdentifier("0xZZ".to_owned()))
        );
        assert_eq!(
            parse_device_id("-1"),
            Err(Error::InvalidIdentifier("-1".to_owned()))
        );
        assert!(parse_device_id("").is_err());
        assert!(parse_device_id("4294967296").is_err());
    }

    #[test]
    fn test_balance_position() {
        assert_eq!(BalancePosition::from_balance(0.5), BalancePosition::Center);
        assert_eq!(BalancePosition::from_balance(0.0), BalancePosition::Left(100));
        assert_eq!(BalancePosition::from_balance(0.25), BalancePosition::Left(50));
        assert_eq!(BalancePosition::from_balance(1.0), BalancePosition::Right(100));
        assert_eq!(BalancePosition::from_balance(0.75), BalancePosition::Right(50));
    }

    #[test]
    fn test_balance_preset_from_value() {
        assert_eq!(BalancePreset::from_value(0.0), Some(BalancePreset::Left));
        assert_eq!(BalancePreset::from_value(0.5), Some(BalancePreset::Center));
        assert_eq!(BalancePreset::from_value(1.0), Some(BalancePreset::Right));
        assert_eq!(BalancePreset::from_value(0.3), None);
    }

    #[test]
    fn test_list_output_devices_marks_default() {
        let system = MockAudioSystem::new();
        stereo_device(&system, 10, "Speakers");
        stereo_device(&system, 11, "Headphones");
        system.set_default_output_device(11);

        let devices = AudioService::new(&system).list_output_devices().unwrap();
        let defaults: Vec<_> = devices
            .iter()
            .map(|d| (d.device.name.as_str(), d.is_default))
            .collect();
        assert_eq!(defaults, vec![("Speakers", false), ("Headphones", true)]);
    }

    #[test]
    fn test_list_output_devices_without_default() {
        let system = MockAudioSystem::new();
        stereo_device(&system, 10, "Speakers");

        let devices = AudioService::new(&system).list_output_devices().unwrap();
        assert_eq!(devices.len(), 1);
        assert!(!devices[0].is_default);
    }

    #[test]
    fn test_set_balance_clamps_and_targets_default_device() {
        let system = MockAudioSystem::new();
        stereo_device(&system, 10, "Speakers");
        stereo_device(&system, 11, "Headphones");
        system.set_default_output_device(11);
        let service = AudioService::new(&system);

        assert_eq!(service.set_balance(1.7), Ok(1.0));
        assert_eq!(system.value::<f32>(11, &OUTPUT_STEREO_PAN_PROPERTY_ADDRESS), Some(1.0));
        assert_eq!(system.value::<f32>(10, &OUTPUT_STEREO_PAN_PROPERTY_ADDRESS), Some(0.5));

        assert_eq!(service.set_balance(-3.0), Ok(0.0));
        assert_eq!(service.set_balance(f32::NAN), Ok(0.5));

        service.balance_left().unwrap();
        let reading = service.current_balance().unwrap();
        assert_eq!(reading.value, 0.0);
        assert_eq!(reading.position, BalancePosition::Left(100));
        assert_eq!(reading.preset(), Some(BalancePreset::Left));

        service.balance_right().unwrap();
        assert_eq!(service.current_balance().unwrap().position, BalancePosition::Right(100));
        service.balance_center().unwrap();
        assert_eq!(service.current_balance().unwrap().position, BalancePosition::Center);
    }

    #[test]
    fn test_set_balance_without_default_device_fails() {
        let system = MockAudioSystem::new();
        stereo_device(&system, 10, "Speakers");
        let service = AudioService::new(&system);
        assert_eq!(
            service.set_balance(0.5),
            Err(Error::QueryFailed(UNKNOWN_PROPERTY_ERR))
        );
    }

    #[test]
    fn test_default_device_volume() {
        let system = MockAudioSystem::new();
        stereo_device(&system, 10, "Speakers");
        system.set_default_output_device(10);
        system.set(10, &output_volume_property_address(LEFT_CHANNEL), 0.2f32);
        let service = AudioService::new(&system);

        assert_eq!(service.volume(LEFT_CHANNEL), Ok(0.2));
        service.set_volume(LEFT_CHANNEL, 0.9).unwrap();
        assert_eq!(service.volume(LEFT_CHANNEL), Ok(0.9));
        assert!(service.volume(RIGHT_CHANNEL).is_err());
        assert_eq!(service.balance_controls(), Ok(BalanceControls::STEREO_PAN));
    }

    #[test]
    fn test_device_info_by_string_id() {
        let system = MockAudioSystem::new();
        stereo_device(&system, 10, "Speakers");
        let service = AudioService::new(&system);

        assert_eq!(service.device_info("10").unwrap().name, "Speakers");
        assert_eq!(
            service.device_info("speakers"),
            Err(Error::InvalidIdentifier("speakers".to_owned()))
        );
    }

    #[test]
    fn test_default_device_info() {
        let system = MockAudioSystem::new();
        let service = AudioService::new(&system);
        assert_eq!(
            service.default_device_info(),
            Err(Error::QueryFailed(UNKNOWN_PROPERTY_ERR))
        );
        system.set_default_output_device(UNKNOWN_OBJECT);
        assert_eq!(
            service.default_device_info(),
            Err(Error::QueryFailed(BAD_OBJECT_ERR))
        );

        stereo_device(&system, 12, "Headphones");
        system.set_default_output_device(12);
        let info = service.default_device_info().unwrap();
        assert_eq!(info.id, 12);
        assert_eq!(info.name, "Headphones");
    }

    #[test]
    fn test_turn_off_display() {
        let displays = MockDisplays::new(vec![
            MockDisplay::new(1).builtin().main(),
            MockDisplay::new(0x2a),
        ]);
        let service = DisplayService::new(&displays);

        assert_eq!(service.turn_off("0x2A"), Ok(0x2a));
        assert!(!displays.display(0x2a).unwrap().active);
        assert!(displays.display(1).unwrap().active);
        assert_eq!(
            service.turn_off("display"),
            Err(Error::InvalidIdentifier("display".to_owned()))
        );
    }

    #[test]
    fn test_turn_off_with_ddc_falls_back_to_deactivation() {
        let displays = MockDisplays::new(vec![MockDisplay::new(7)]);
        let service = DisplayService::new(&displays);

        assert_eq!(service.turn_off_with_ddc("7"), Ok(7));
        assert!(!displays.display(7).unwrap().active);
        assert_eq!(service.list().unwrap().len(), 1);
    }
}
