//! System enumeration and polling for the system and disk monitor widgets.

use std::sync::OnceLock;
use std::time::Duration;

use log::trace;
use sysinfo::{Components, Disks, Networks, System};
use tokio::sync::watch;

/// One mounted filesystem as offered in the disk picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskInfo {
    pub mount: String,
    pub name: String,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Cached disk list for the disk picker (avoids expensive filesystem scan on each call)
static CACHED_DISKS: OnceLock<Vec<DiskInfo>> = OnceLock::new();

/// Get the list of mounted disks offered in the disk monitor picker.
///
/// This is cached on first call to avoid expensive filesystem scans on every
/// form interaction. The cache is populated once and reused for the lifetime
/// of the application. Restart the app to detect newly mounted disks.
pub fn available_disks() -> Vec<DiskInfo> {
    CACHED_DISKS
        .get_or_init(|| {
            let disks = Disks::new_with_refreshed_list();
            disks
                .iter()
                .map(|disk| DiskInfo {
                    mount: disk.mount_point().to_string_lossy().to_string(),
                    name: disk.name().to_string_lossy().to_string(),
                    total_bytes: disk.total_space(),
                    available_bytes: disk.available_space(),
                })
                .collect()
        })
        .clone()
}

/// Interface names offered in the network gauge picker.
pub fn network_interfaces() -> Vec<String> {
    let networks = Networks::new_with_refreshed_list();
    let mut names: Vec<String> = networks.iter().map(|(name, _)| name.clone()).collect();
    names.sort();
    names
}

/// Per-interface traffic counters since the previous refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSnapshot {
    pub interface: String,
    pub received: u64,
    pub transmitted: u64,
}

/// One sampling of everything the system monitor gauges can show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    /// Average CPU usage in percent.
    pub cpu_usage: f32,
    pub memory_used: u64,
    pub memory_total: u64,
    /// Hottest component temperature in °C, if any sensor reports one.
    pub temperature: Option<f32>,
    pub networks: Vec<NetworkSnapshot>,
}

impl SystemSnapshot {
    /// The interface with the most combined traffic since the last sample;
    /// used when the network gauge has no pinned interface.
    pub fn busiest_interface(&self) -> Option<&NetworkSnapshot> {
        self.networks
            .iter()
            .max_by_key(|n| n.received + n.transmitted)
    }
}

/// Stateful sampler behind the poll loop.
pub struct SystemMonitor {
    system: System,
    networks: Networks,
    components: Components,
}

impl SystemMonitor {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
        }
    }

    pub fn snapshot(&mut self) -> SystemSnapshot {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.networks.refresh();
        self.components.refresh();

        let networks = self
            .networks
            .iter()
            .map(|(name, data)| NetworkSnapshot {
                interface: name.clone(),
                received: data.received(),
                transmitted: data.transmitted(),
            })
            .collect();

        let temperature = self
            .components
            .iter()
            .map(|c| c.temperature())
            .fold(None, |max: Option<f32>, t| match max {
                Some(m) if m >= t => Some(m),
                _ => Some(t),
            });

        SystemSnapshot {
            cpu_usage: self.system.global_cpu_usage(),
            memory_used: self.system.used_memory(),
            memory_total: self.system.total_memory(),
            temperature,
            networks,
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Default sampling interval for the poll loop.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Spawn the background sampling loop.
///
/// Receivers get a fresh [`SystemSnapshot`] every interval; the loop stops
/// once the last receiver is dropped.
pub fn spawn_poller(interval: Duration) -> watch::Receiver<SystemSnapshot> {
    let (tx, rx) = watch::channel(SystemSnapshot::default());
    tokio::spawn(async move {
        let mut monitor = SystemMonitor::new();
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let snapshot = monitor.snapshot();
            trace!("System snapshot: cpu {:.1}%", snapshot.cpu_usage);
            if tx.send(snapshot).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reports_memory() {
        let mut monitor = SystemMonitor::new();
        let snapshot = monitor.snapshot();
        assert!(snapshot.memory_used <= snapshot.memory_total);
    }

    #[test]
    fn test_busiest_interface_picks_max_traffic() {
        let snapshot = SystemSnapshot {
            networks: vec![
                NetworkSnapshot {
                    interface: "lo".to_string(),
                    received: 10,
                    transmitted: 5,
                },
                NetworkSnapshot {
                    interface: "eth0".to_string(),
                    received: 1000,
                    transmitted: 800,
                },
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.busiest_interface().unwrap().interface, "eth0");
    }

    #[test]
    fn test_disk_cache_is_stable() {
        assert_eq!(available_disks(), available_disks());
    }
}
