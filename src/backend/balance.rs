// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

//! Left/right balance over two overlapping native controls.
//!
//! Drivers may expose the stereo pan control, the virtual main balance
//! control, both, or neither. Callers always see one balance value in [0, 1]
//! (0 full left, 0.5 center, 1 full right). Stereo pan wins whenever it is
//! present. A write the pan control rejects falls through to the virtual
//! balance control.
//!
//! The two controls document different natural ranges (pan is bipolar,
//! balance is unipolar) but the value is passed to either one unchanged.

use super::audio_system::AudioSystem;
use super::device_property::PropertyAccessor;
use super::error::{Error, Result};
use super::property_address::*;
use tracing::debug;

pub const DEFAULT_BALANCE: f32 = 0.5;

bitflags! {
    /// Balance controls a device exposes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BalanceControls: u32 {
        const STEREO_PAN      = 0b0000_0001;
        const VIRTUAL_BALANCE = 0b0000_0010;
    }
}

// In priority order.
static BALANCE_CONTROLS: [(BalanceControls, PropertyAddress); 2] = [
    (BalanceControls::STEREO_PAN, OUTPUT_STEREO_PAN_PROPERTY_ADDRESS),
    (BalanceControls::VIRTUAL_BALANCE, OUTPUT_VIRTUAL_MAIN_BALANCE_PROPERTY_ADDRESS),
];

fn control_name(control: BalanceControls) -> &'static str {
    if control == BalanceControls::STEREO_PAN {
        "stereo pan"
    } else {
        "virtual main balance"
    }
}

pub struct BalanceController<'a, S: ?Sized> {
    system: &'a S,
}

impl<'a, S: AudioSystem + ?Sized> BalanceController<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self { system }
    }

    pub fn controls(&self, id: AudioDeviceID) -> BalanceControls {
        BALANCE_CONTROLS
            .iter()
            .filter(|(_, address)| self.system.probe(id, address))
            .fold(BalanceControls::empty(), |controls, (control, _)| {
                controls | *control
            })
    }

    fn active_control(&self, id: AudioDeviceID) -> Option<&'static (BalanceControls, PropertyAddress)> {
        BALANCE_CONTROLS
            .iter()
            .find(|(_, address)| self.system.probe(id, address))
    }

    /// Returns [`DEFAULT_BALANCE`] when the device has no balance control.
    pub fn get_balance(&self, id: AudioDeviceID) -> Result<f32> {
        match self.active_control(id) {
            Some((control, address)) => {
                let balance = self.system.read::<f32>(id, address)?;
                debug!("Device {} balance {} via {}", id, balance, control_name(*control));
                Ok(balance)
            }
            None => Ok(DEFAULT_BALANCE),
        }
    }

    /// Writes through the first present control that accepts the value. A
    /// rejected write moves on to the next control; the last error is
    /// returned when every present control rejects it.
    pub fn set_balance(&self, id: AudioDeviceID, balance: f32) -> Result<()> {
        let mut result = Err(Error::CapabilityUnsupported);
        for (control, address) in BALANCE_CONTROLS
            .iter()
            .filter(|(_, address)| self.system.probe(id, address))
        {
            match self.system.write(id, address, &balance) {
                Ok(()) => {
                    debug!("Set device {} balance to {} using {}", id, balance, control_name(*control));
                    return Ok(());
                }
                Err(e) => {
                    debug!("Device {} rejected balance via {}: {}", id, control_name(*control), e);
                    result = Err(e);
                }
            }
        }
        result
    }
}
