use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Config {
    /// Delay before the first probe, milliseconds.
    pub initial_delay_ms: u64,
    /// Interval between probes while searching, milliseconds.
    pub poll_interval_ms: u64,
    /// Probe attempts before giving up. 0 = keep probing forever.
    pub max_probe_attempts: u32,
    /// Path of the archives directory relative to the current page.
    pub archives_path: String,
    /// Local archives directory for the filesystem lister.
    pub archives_dir: String,
    /// Base URL for the HTTP lister.
    pub base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            initial_delay_ms: std::env::var("INITIAL_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            max_probe_attempts: std::env::var("MAX_PROBE_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            archives_path: std::env::var("ARCHIVES_PATH").unwrap_or_else(|_| "archives".to_string()),
            archives_dir: std::env::var("ARCHIVES_DIR").unwrap_or_else(|_| "./archives".to_string()),
            base_url: std::env::var("BASE_URL").ok(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config {
            initial_delay_ms: 1000,
            poll_interval_ms: 500,
            max_probe_attempts: 0,
            archives_path: "archives".to_string(),
            archives_dir: "./archives".to_string(),
            base_url: None,
        }
    }

    #[test]
    fn test_config_json_round_trip() {
        let json = defaults().to_json();
        assert!(json.contains("\"poll_interval_ms\""));
        assert!(json.contains("\"archives_path\""));
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("config JSON is valid");
        assert!(parsed.is_object());
    }
}
