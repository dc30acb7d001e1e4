// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use super::error::{Error, Result};
use super::utils::allocate_array;
use tracing::{debug, warn};

pub type DisplayId = u32;
pub type CGError = i32;

pub const NULL_DISPLAY: DisplayId = 0;

// Displays beyond this are left out of listings.
pub const DISPLAY_LIST_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigureOption {
    AppOnly,
    Session,
    Permanently,
}

/// Quartz Display Services, as far as listing and reconfiguring go.
pub trait DisplayBackend {
    /// Handle of an open display-configuration transaction.
    type Config;

    /// Fills the front of `displays` and returns how many ids were written,
    /// never more than `displays.len()`.
    fn online_display_list(&self, displays: &mut [DisplayId]) -> std::result::Result<usize, CGError>;

    fn is_builtin(&self, id: DisplayId) -> bool;

    fn is_main(&self, id: DisplayId) -> bool;

    fn is_active(&self, id: DisplayId) -> bool;

    /// (width, height) in pixels.
    fn pixels(&self, id: DisplayId) -> (usize, usize);

    fn begin_configuration(&self) -> std::result::Result<Self::Config, CGError>;

    fn configure_mirror_of_display(
        &self,
        config: &Self::Config,
        display: DisplayId,
        master: DisplayId,
    ) -> std::result::Result<(), CGError>;

    fn complete_configuration(
        &self,
        config: Self::Config,
        option: ConfigureOption,
    ) -> std::result::Result<(), CGError>;

    fn cancel_configuration(&self, config: Self::Config);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display {
    pub id: DisplayId,
    pub is_builtin: bool,
    pub is_main: bool,
    pub is_active: bool,
    pub width: usize,
    pub height: usize,
    pub name: String,
}

pub fn display_name(id: DisplayId) -> String {
    format!("Display {}", id)
}

pub struct DisplayRegistry<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B: DisplayBackend + ?Sized> DisplayRegistry<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// At most [`DISPLAY_LIST_CAPACITY`] displays, in platform order.
    pub fn all(&self) -> Result<Vec<Display>> {
        let mut ids = allocate_array::<DisplayId>(DISPLAY_LIST_CAPACITY);
        let count = self.backend.online_display_list(&mut ids).map_err(|err| {
            debug!("CGGetOnlineDisplayList rv={}", err);
            Error::QueryFailed(err)
        })?;
        ids.truncate(count);

        Ok(ids
            .into_iter()
            .filter(|&id| id != NULL_DISPLAY)
            .map(|id| {
                let (width, height) = self.backend.pixels(id);
                Display {
                    id,
                    is_builtin: self.backend.is_builtin(id),
                    is_main: self.backend.is_main(id),
                    is_active: self.backend.is_active(id),
                    width,
                    height,
                    name: display_name(id),
                }
            })
            .collect())
    }

    /// Takes the display off the desktop for this login session by making it
    /// mirror nothing. The panel keeps its power.
    pub fn deactivate(&self, id: DisplayId) -> Result<()> {
        let config = self.backend.begin_configuration().map_err(|err| {
            debug!("CGBeginDisplayConfiguration rv={}", err);
            Error::QueryFailed(err)
        })?;
        if let Err(err) = self
            .backend
            .configure_mirror_of_display(&config, id, NULL_DISPLAY)
        {
            warn!("CGConfigureDisplayMirrorOfDisplay({:#x}) rv={}, cancelling", id, err);
            self.backend.cancel_configuration(config);
            return Err(Error::QueryFailed(err));
        }
        self.backend
            .complete_configuration(config, ConfigureOption::Session)
            .map_err(|err| {
                debug!("CGCompleteDisplayConfiguration rv={}", err);
                Error::QueryFailed(err)
            })
    }

    // TODO: Send VCP 0xD6 (power mode off) over DDC/CI once an I2C path to
    //       external displays exists.
    pub fn ddc_power_off(&self, _id: DisplayId) -> Result<()> {
        Err(Error::CapabilityUnsupported)
    }
}

#[cfg(target_os = "macos")]
pub use self::coregraphics::CoreGraphicsDisplays;

#[cfg(target_os = "macos")]
mod coregraphics {
    use super::*;
    use coreaudio_sys_utils::{
        cg_begin_display_configuration, cg_cancel_display_configuration,
        cg_complete_display_configuration, cg_configure_display_mirror_of_display,
        cg_display_is_active, cg_display_is_builtin, cg_display_is_main, cg_display_pixels,
        cg_get_online_display_list, kCGConfigureForAppOnly, kCGConfigureForSession,
        kCGConfigurePermanently, kCGErrorSuccess, CGDisplayConfigRef,
    };

    #[derive(Clone, Copy, Debug, Default)]
    pub struct CoreGraphicsDisplays;

    fn check(err: CGError) -> std::result::Result<(), CGError> {
        if err == kCGErrorSuccess {
            Ok(())
        } else {
            Err(err)
        }
    }

    impl DisplayBackend for CoreGraphicsDisplays {
        type Config = CGDisplayConfigRef;

        fn online_display_list(
            &self,
            displays: &mut [DisplayId],
        ) -> std::result::Result<usize, CGError> {
            cg_get_online_display_list(displays)
        }

        fn is_builtin(&self, id: DisplayId) -> bool {
            cg_display_is_builtin(id)
        }

        fn is_main(&self, id: DisplayId) -> bool {
            cg_display_is_main(id)
        }

        fn is_active(&self, id: DisplayId) -> bool {
            cg_display_is_active(id)
        }

        fn pixels(&self, id: DisplayId) -> (usize, usize) {
            cg_display_pixels(id)
        }

        fn begin_configuration(&self) -> std::result::Result<Self::Config, CGError> {
            cg_begin_display_configuration()
        }

        fn configure_mirror_of_display(
            &self,
            config: &Self::Config,
            display: DisplayId,
            master: DisplayId,
        ) -> std::result::Result<(), CGError> {
            check(cg_configure_display_mirror_of_display(*config, display, master))
        }

        fn complete_configuration(
            &self,
            config: Self::Config,
            option: ConfigureOption,
        ) -> std::result::Result<(), CGError> {
            let option = match option {
                ConfigureOption::AppOnly => kCGConfigureForAppOnly,
                ConfigureOption::Session => kCGConfigureForSession,
                ConfigureOption::Permanently => kCGConfigurePermanently,
            };
            check(cg_complete_display_configuration(config, option))
        }

        fn cancel_configuration(&self, config: Self::Config) {
            let err = cg_cancel_display_configuration(config);
            if err != kCGErrorSuccess {
                warn!("CGCancelDisplayConfiguration rv={}", err);
            }
        }
    }
}
