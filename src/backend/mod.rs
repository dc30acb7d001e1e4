// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

mod audio_system;
mod balance;
mod device_info;
mod device_property;
mod device_registry;
mod display;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod property_address;
mod property_data;
mod utils;
mod volume;

pub use self::audio_system::*;
pub use self::balance::*;
pub use self::device_info::*;
pub use self::device_property::*;
pub use self::device_registry::*;
pub use self::display::*;
pub use self::error::*;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::*;
pub use self::property_address::*;
pub use self::property_data::*;
pub use self::volume::*;

#[cfg(test)]
mod tests;
