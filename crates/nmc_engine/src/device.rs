//! Accelerator availability and selection.
//!
//! The kernel-launch wrapper itself is an external collaborator; this
//! module is the seam the engine binds to. Without an accelerator
//! runtime linked into the build, availability queries report `false`
//! and selection fails with [`DeviceError::Unavailable`] - the caller
//! decides whether to retry on the CPU backend.

use nmc_core::DeviceError;

/// Opaque handle to a selected accelerator device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceHandle {
    id: u32,
}

impl DeviceHandle {
    /// The device id this handle was selected with.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }
}

/// Whether an accelerator device can be selected in this build.
pub fn is_accelerator_available() -> bool {
    false
}

/// Selects the accelerator with the given device id.
///
/// # Errors
///
/// Returns [`DeviceError::Unavailable`] when no accelerator runtime is
/// linked, [`DeviceError::InvalidDevice`] for ids the runtime rejects.
pub fn select_accelerator(device_id: u32) -> Result<DeviceHandle, DeviceError> {
    if !is_accelerator_available() {
        return Err(DeviceError::Unavailable);
    }
    Ok(DeviceHandle { id: device_id })
}
