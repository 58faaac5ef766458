use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::system::disks::DEFAULT_DISK_PREFIXES;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub sources: SourcesConfig,
    pub colors: ColorsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub fps: u64,
    pub refresh_every_frames: u64,
    pub show_disk_usage: bool,
    pub show_gpus: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            fps: 15,
            refresh_every_frames: 4,
            show_disk_usage: true,
            show_gpus: true,
        }
    }
}

impl GeneralConfig {
    /// Time between animation frames; never zero, whatever `fps` says.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1)).max(Duration::from_millis(1))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub accent: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            accent: String::new(),
        }
    }
}

/// Where each field is read from. Commands are argv lists; an empty list
/// disables that source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub battery_capacity: PathBuf,
    pub disk_prefixes: Vec<String>,
    pub terminal_ancestor_depth: usize,
    pub process_list: Vec<String>,
    pub amdgpu_top: Vec<String>,
    pub nvidia_smi: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            proc_root: PathBuf::from("/proc"),
            os_release: PathBuf::from("/etc/os-release"),
            battery_capacity: PathBuf::from("/sys/class/power_supply/BAT0/capacity"),
            disk_prefixes: DEFAULT_DISK_PREFIXES.iter().map(|p| p.to_string()).collect(),
            terminal_ancestor_depth: 2,
            process_list: argv(&["ps", "aux"]),
            amdgpu_top: argv(&["amdgpu_top", "-d"]),
            nvidia_smi: argv(&[
                "nvidia-smi",
                "--query-gpu=name,memory.used,memory.total",
                "--format=csv,noheader",
            ]),
        }
    }
}

impl SourcesConfig {
    pub fn stat(&self) -> PathBuf {
        self.proc_root.join("stat")
    }

    pub fn cpuinfo(&self) -> PathBuf {
        self.proc_root.join("cpuinfo")
    }

    pub fn meminfo(&self) -> PathBuf {
        self.proc_root.join("meminfo")
    }

    pub fn mounts(&self) -> PathBuf {
        self.proc_root.join("mounts")
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("orbfetch").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
