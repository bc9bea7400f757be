//! System information adapter.
//!
//! Implements [`SystemPort`]: free heap and the AP address shown on the
//! status page.

use core::net::Ipv4Addr;

use crate::app::ports::SystemPort;

/// Fixed free-heap figure reported off target.
#[cfg(not(target_os = "espidf"))]
pub const SIM_FREE_HEAP_BYTES: u32 = 200_000;

pub struct EspSystemAdapter {
    ap_ip: Ipv4Addr,
}

impl EspSystemAdapter {
    /// `ap_ip` is whatever the AP bring-up produced (`0.0.0.0` on failure).
    pub fn new(ap_ip: Ipv4Addr) -> Self {
        Self { ap_ip }
    }
}

impl SystemPort for EspSystemAdapter {
    #[cfg(target_os = "espidf")]
    fn free_heap_bytes(&self) -> u32 {
        unsafe { esp_idf_svc::sys::esp_get_free_heap_size() }
    }

    #[cfg(not(target_os = "espidf"))]
    fn free_heap_bytes(&self) -> u32 {
        SIM_FREE_HEAP_BYTES
    }

    fn ap_ip(&self) -> Ipv4Addr {
        self.ap_ip
    }
}
