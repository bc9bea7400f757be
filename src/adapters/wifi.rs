//! WiFi soft access point adapter.
//!
//! Implements [`AccessPointPort`], the hexagonal boundary for bringing the
//! radio up as an AP that clients join directly.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stub reporting the ESP-IDF default
//!   AP address, for host-side tests and the simulation binary.
//!
//! A failed bring-up is not fatal: [`start_or_degrade`] logs the error
//! and the firmware keeps serving on `0.0.0.0`.

use core::net::Ipv4Addr;
use log::{error, info};

use crate::config::AccessPointConfig;
use crate::error::AccessPointError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    hal::modem::Modem,
    nvs::EspDefaultNvsPartition,
    wifi::{AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi},
};

/// Address ESP-IDF assigns to its default AP interface.
pub const DEFAULT_AP_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 4, 1);

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

pub trait AccessPointPort {
    /// Configure and start the AP. Returns the interface address.
    fn start(&mut self, config: &AccessPointConfig) -> Result<Ipv4Addr, AccessPointError>;
    /// Interface address, `0.0.0.0` unless the AP is up.
    fn ip(&self) -> Ipv4Addr;
}

/// Start the AP; on failure log it and carry on with `0.0.0.0`.
pub fn start_or_degrade(ap: &mut impl AccessPointPort, config: &AccessPointConfig) -> Ipv4Addr {
    match ap.start(config) {
        Ok(ip) => {
            info!("AP '{}' up, IP {}", config.ssid, ip);
            ip
        }
        Err(e) => {
            error!("AP bring-up failed: {} (continuing without network)", e);
            Ipv4Addr::UNSPECIFIED
        }
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ip: Ipv4Addr,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    /// Simulation: make `start` fail to exercise the degraded path.
    #[cfg(not(target_os = "espidf"))]
    fail_start: bool,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
    ) -> Result<Self, AccessPointError> {
        let driver = EspWifi::new(modem, sysloop.clone(), nvs).map_err(|e| {
            error!("WiFi: driver init: {:?}", e);
            AccessPointError::DriverInit
        })?;
        let wifi = BlockingWifi::wrap(driver, sysloop).map_err(|e| {
            error!("WiFi: blocking wrap: {:?}", e);
            AccessPointError::DriverInit
        })?;
        Ok(Self {
            ip: Ipv4Addr::UNSPECIFIED,
            wifi,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            ip: Ipv4Addr::UNSPECIFIED,
            fail_start: false,
        }
    }

    /// Simulation adapter whose `start` always fails.
    #[cfg(not(target_os = "espidf"))]
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::new()
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self, config: &AccessPointConfig) -> Result<Ipv4Addr, AccessPointError> {
        let ap = AccessPointConfiguration {
            ssid: config
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| AccessPointError::InvalidSsid)?,
            password: config
                .password
                .as_str()
                .try_into()
                .map_err(|_| AccessPointError::InvalidPassword)?,
            auth_method: if config.is_open() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            channel: config.channel,
            max_connections: config.max_connections,
            ssid_hidden: false,
            ..Default::default()
        };

        let started = self
            .wifi
            .set_configuration(&Configuration::AccessPoint(ap))
            .and_then(|()| self.wifi.start())
            .and_then(|()| self.wifi.wait_netif_up());
        if let Err(e) = started {
            error!("WiFi: AP start: {:?}", e);
            return Err(AccessPointError::StartFailed);
        }

        let info = self.wifi.wifi().ap_netif().get_ip_info().map_err(|e| {
            error!("WiFi: AP ip info: {:?}", e);
            AccessPointError::StartFailed
        })?;
        Ok(info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self, config: &AccessPointConfig) -> Result<Ipv4Addr, AccessPointError> {
        if self.fail_start {
            return Err(AccessPointError::StartFailed);
        }
        info!(
            "WiFi(sim): AP '{}' on channel {} ({})",
            config.ssid,
            config.channel,
            if config.is_open() { "open" } else { "WPA2" }
        );
        Ok(DEFAULT_AP_IP)
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessPointPort for WifiAdapter {
    fn start(&mut self, config: &AccessPointConfig) -> Result<Ipv4Addr, AccessPointError> {
        self.ip = Ipv4Addr::UNSPECIFIED;
        config.validate()?;
        self.ip = self.platform_start(config)?;
        Ok(self.ip)
    }

    fn ip(&self) -> Ipv4Addr {
        self.ip
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
