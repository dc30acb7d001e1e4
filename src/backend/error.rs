// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::property_address::fourcc;
use thiserror::Error;

/// Platform status code. Zero is success, anything else is carried verbatim.
pub type OSStatus = i32;

pub const NO_ERR: OSStatus = 0;
pub const BAD_OBJECT_ERR: OSStatus = fourcc(b"!obj") as OSStatus;
pub const UNKNOWN_PROPERTY_ERR: OSStatus = fourcc(b"who?") as OSStatus;
pub const BAD_PROPERTY_SIZE_ERR: OSStatus = fourcc(b"!siz") as OSStatus;
pub const ILLEGAL_OPERATION_ERR: OSStatus = fourcc(b"nope") as OSStatus;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Every known control for the operation was probed and is absent.
    #[error("device does not support the requested control")]
    CapabilityUnsupported,
    #[error("platform query failed (status {0})")]
    QueryFailed(OSStatus),
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// Turns a platform status into a `Result`.
pub fn check(status: OSStatus) -> Result<()> {
    if status == NO_ERR {
        Ok(())
    } else {
        Err(Error::QueryFailed(status))
    }
}

#[test]
fn test_check_status() {
    assert_eq!(check(NO_ERR), Ok(()));
    assert_eq!(check(-50), Err(Error::QueryFailed(-50)));
}
