// src/benchmark/system_info.rs

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub os: String,
    pub os_version: String,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub cpu_threads: usize,
    pub total_memory_mb: u64,
    pub rust_version: String,
}

impl SystemInfo {
    pub fn collect() -> Self {
        use sysinfo::System;

        let mut sys = System::new_all();
        sys.refresh_all();

        // CPU info
        let cpu_model = sys.cpus()
            .first()
            .map(|cpu| cpu.brand().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let cpu_cores = sys.physical_core_count().unwrap_or(0);
        let cpu_threads = sys.cpus().len();

        // Memory in MB
        let total_memory_mb = sys.total_memory() / 1024 / 1024;

        // OS info
        let os = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());
        let hostname = System::host_name().unwrap_or_else(|| "Unknown".to_string());

        // Rust version
        let rust_version = Self::get_rust_version();

        SystemInfo {
            hostname,
            os,
            os_version,
            cpu_model,
            cpu_cores,
            cpu_threads,
            total_memory_mb,
            rust_version,
        }
    }

    fn get_rust_version() -> String {
        env::var("RUSTC_VERSION")
            .unwrap_or_else(|_| {
                // Try to get from rustc --version
                std::process::Command::new("rustc")
                    .arg("--version")
                    .output()
                    .ok()
                    .and_then(|output| String::from_utf8(output.stdout).ok())
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            })
    }

    pub fn to_string_pretty(&self) -> String {
        format!(
            r#"System Information:
  Hostname:     {}
  OS:           {} {}
  CPU:          {} ({} cores, {} threads)
  Memory:       {} MB
  Rust:         {}
"#,
            self.hostname,
            self.os,
            self.os_version,
            self.cpu_model,
            self.cpu_cores,
            self.cpu_threads,
            self.total_memory_mb,
            self.rust_version,
        )
    }
}
