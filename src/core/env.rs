//! Host environment detection used to pre-fill a session's Environment field.

use serde::{Deserialize, Serialize};

/// Host details a tester usually records by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ram_bytes: Option<u64>,

    pub os: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        EnvironmentInfo {
            cpu_model: None,
            cpu_cores: None,
            total_ram_bytes: None,
            os: std::env::consts::OS.to_string(),
            os_version: None,
            hostname: None,
        }
    }
}

impl EnvironmentInfo {
    /// Detect environment information from the current system
    pub fn detect() -> Self {
        use sysinfo::System;

        let mut sys = System::new_all();
        sys.refresh_all();

        let cpu_model = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|s| !s.is_empty());
        let cpu_cores = sys.physical_core_count().map(|c| c as u32);
        let total_ram_bytes = Some(sys.total_memory()).filter(|b| *b > 0);
        let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        let os_version = System::os_version();
        let hostname = System::host_name();

        EnvironmentInfo {
            cpu_model,
            cpu_cores,
            total_ram_bytes,
            os,
            os_version,
            hostname,
        }
    }

    /// One-line summary suitable for appending to a session's Environment field.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        match &self.os_version {
            Some(version) => parts.push(format!("{} {}", self.os, version)),
            None => parts.push(self.os.clone()),
        }
        if let Some(host) = &self.hostname {
            parts.push(format!("host {host}"));
        }
        match (&self.cpu_model, self.cpu_cores) {
            (Some(model), Some(cores)) => parts.push(format!("{model} ({cores} cores)")),
            (Some(model), None) => parts.push(model.clone()),
            (None, Some(cores)) => parts.push(format!("{cores} cores")),
            (None, None) => {}
        }
        if let Some(bytes) = self.total_ram_bytes {
            parts.push(format!("{:.1} GB RAM", bytes as f64 / 1_000_000_000.0));
        }

        parts.join(", ")
    }
}
