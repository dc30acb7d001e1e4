// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

//! Control of audio output devices and displays through the platform's
//! property-addressed hardware services.
//!
//! Everything here is synchronous and stateless: each call re-reads the
//! hardware state it needs, so results are always fresh snapshots.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate float_cmp;
#[cfg(target_os = "macos")]
extern crate coreaudio_sys_utils;

mod backend;
mod service;

pub use backend::*;
pub use service::*;
