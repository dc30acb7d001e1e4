// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

//! The (selector, scope, element) vocabulary shared with the platform.
//!
//! Selectors, scopes and transport codes are four-char codes with the same
//! numeric values as the platform's headers, so an address can be handed to
//! the platform without translation.

use std::fmt;

pub type AudioObjectID = u32;
pub type AudioDeviceID = AudioObjectID;
pub type PropertySelector = u32;
pub type PropertyElement = u32;

pub const SYSTEM_OBJECT: AudioObjectID = 1;
pub const UNKNOWN_OBJECT: AudioObjectID = 0;

pub const ELEMENT_MAIN: PropertyElement = 0;

pub const fn fourcc(code: &[u8; 4]) -> u32 {
    ((code[0] as u32) << 24) | ((code[1] as u32) << 16) | ((code[2] as u32) << 8) | code[3] as u32
}

pub fn fourcc_to_string(code: u32) -> String {
    let bytes = code.to_be_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        bytes.iter().map(|&b| b as char).collect()
    } else {
        format!("{:#x}", code)
    }
}

// Hardware (system object) selectors.
pub const HARDWARE_DEVICES: PropertySelector = fourcc(b"dev#");
pub const HARDWARE_DEFAULT_OUTPUT_DEVICE: PropertySelector = fourcc(b"dOut");

// Object and device selectors.
pub const OBJECT_NAME: PropertySelector = fourcc(b"lnam");
pub const OBJECT_MANUFACTURER: PropertySelector = fourcc(b"lmak");
pub const DEVICE_STREAM_CONFIGURATION: PropertySelector = fourcc(b"slay");
pub const DEVICE_PREFERRED_CHANNELS_FOR_STEREO: PropertySelector = fourcc(b"dch2");
pub const DEVICE_AVAILABLE_NOMINAL_SAMPLE_RATES: PropertySelector = fourcc(b"nsr#");
pub const DEVICE_STEREO_PAN: PropertySelector = fourcc(b"span");
pub const DEVICE_MUTE: PropertySelector = fourcc(b"mute");
pub const DEVICE_TRANSPORT_TYPE: PropertySelector = fourcc(b"tran");
pub const VIRTUAL_MAIN_VOLUME: PropertySelector = fourcc(b"vmvc");
pub const VIRTUAL_MAIN_BALANCE: PropertySelector = fourcc(b"vmbl");

// Selectors whose platform value is a CFString rather than plain bytes.
pub const STRING_SELECTORS: [PropertySelector; 2] = [OBJECT_NAME, OBJECT_MANUFACTURER];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Input,
    Output,
}

impl Scope {
    pub const fn code(self) -> u32 {
        match self {
            Scope::Global => fourcc(b"glob"),
            Scope::Input => fourcc(b"inpt"),
            Scope::Output => fourcc(b"outp"),
        }
    }
}

/// One control point on an audio object. It names no object by itself; the
/// object id is always supplied alongside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyAddress {
    pub selector: PropertySelector,
    pub scope: Scope,
    pub element: PropertyElement,
}

impl PropertyAddress {
    pub const fn new(selector: PropertySelector, scope: Scope, element: PropertyElement) -> Self {
        Self {
            selector,
            scope,
            element,
        }
    }

    pub const fn main(selector: PropertySelector, scope: Scope) -> Self {
        Self::new(selector, scope, ELEMENT_MAIN)
    }

    pub const fn with_element(self, element: PropertyElement) -> Self {
        Self::new(self.selector, self.scope, element)
    }
}

impl fmt::Display for PropertyAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            fourcc_to_string(self.selector),
            fourcc_to_string(self.scope.code()),
            self.element
        )
    }
}

pub const DEVICES_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(HARDWARE_DEVICES, Scope::Global);

pub const DEFAULT_OUTPUT_DEVICE_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(HARDWARE_DEFAULT_OUTPUT_DEVICE, Scope::Global);

pub const NAME_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(OBJECT_NAME, Scope::Global);

pub const MANUFACTURER_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(OBJECT_MANUFACTURER, Scope::Global);

pub const OUTPUT_STREAM_CONFIGURATION_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(DEVICE_STREAM_CONFIGURATION, Scope::Output);

pub const OUTPUT_PREFERRED_STEREO_CHANNELS_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(DEVICE_PREFERRED_CHANNELS_FOR_STEREO, Scope::Output);

pub const OUTPUT_AVAILABLE_SAMPLE_RATES_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(DEVICE_AVAILABLE_NOMINAL_SAMPLE_RATES, Scope::Output);

pub const OUTPUT_STEREO_PAN_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(DEVICE_STEREO_PAN, Scope::Output);

pub const OUTPUT_VIRTUAL_MAIN_BALANCE_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(VIRTUAL_MAIN_BALANCE, Scope::Output);

pub const OUTPUT_MUTE_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(DEVICE_MUTE, Scope::Output);

pub const TRANSPORT_TYPE_PROPERTY_ADDRESS: PropertyAddress =
    PropertyAddress::main(DEVICE_TRANSPORT_TYPE, Scope::Global);

// Element is the 1-based channel number.
pub const fn output_volume_property_address(channel: PropertyElement) -> PropertyAddress {
    PropertyAddress::new(VIRTUAL_MAIN_VOLUME, Scope::Output, channel)
}

#[test]
fn test_fourcc_matches_platform_values() {
    // kAudioObjectPropertyScopeOutput and kAudioHardwarePropertyDevices.
    assert_eq!(Scope::Output.code(), 0x6f75_7470);
    assert_eq!(HARDWARE_DEVICES, 0x6465_7623);
    assert_eq!(fourcc_to_string(DEVICE_STEREO_PAN), "span");
    assert_eq!(fourcc_to_string(1), "0x1");
}

#[test]
fn test_address_display() {
    let address = output_volume_property_address(2);
    assert_eq!(address.to_string(), "vmvc/outp/2");
    assert_eq!(
        OUTPUT_MUTE_PROPERTY_ADDRESS.with_element(1),
        PropertyAddress::new(DEVICE_MUTE, Scope::Output, 1)
    );
}
