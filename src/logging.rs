//! Structured console logging.
//!
//! One JSON object per line on stdout. Diagnostics here are
//! best-effort tracing for whoever is watching the console; nothing is
//! written to a durable store. Filtering is env-driven: `LOG_LEVEL`
//! sets the minimum level, `LOG_DOMAINS` is a comma-separated domain
//! list (or "all").

use chrono::Utc;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Probe,   // widget/chart discovery polling
    Attach,  // affordances, banner, style registration
    Click,   // click-to-point mapping
    Archive, // run listing fetch/parse
    Nav,     // confirmation and navigation
    System,  // startup, wiring
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Probe => "probe",
            Domain::Attach => "attach",
            Domain::Click => "click",
            Domain::Archive => "archive",
            Domain::Nav => "nav",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }

    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("domain".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("data".to_string(), Value::Object(fields));
    println!("{}", Value::Object(entry));
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// ---------------------------------------------------------------------------
// Domain-specific helpers
// ---------------------------------------------------------------------------

pub fn log_probe_miss(attempt: u32, missing: &str) {
    log(
        Level::Debug,
        Domain::Probe,
        "miss",
        obj(&[("attempt", json!(attempt)), ("missing", v_str(missing))]),
    );
}

pub fn log_attached(chart_kind: &str) {
    log(
        Level::Info,
        Domain::Attach,
        "attached",
        obj(&[("chart", v_str(chart_kind))]),
    );
}

pub fn log_runs_found(count: usize) {
    log(
        Level::Debug,
        Domain::Archive,
        "runs_found",
        obj(&[("count", json!(count))]),
    );
}

pub fn log_fetch_error(err: &str) {
    log(
        Level::Error,
        Domain::Archive,
        "fetch_failed",
        obj(&[("error", v_str(err))]),
    );
}

pub fn log_click_mapped(click_x: f64, total_points: usize, target: &str) {
    log(
        Level::Debug,
        Domain::Click,
        "mapped",
        obj(&[
            ("click_x", v_num(click_x)),
            ("total_points", json!(total_points)),
            ("target", v_str(target)),
        ]),
    );
}

pub fn log_navigate(url: &str, confirmed: bool) {
    log(
        Level::Info,
        Domain::Nav,
        if confirmed { "navigate" } else { "declined" },
        obj(&[("url", v_str(url))]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_domain_names_unique() {
        let all = [
            Domain::Probe,
            Domain::Attach,
            Domain::Click,
            Domain::Archive,
            Domain::Nav,
            Domain::System,
        ];
        let mut names: Vec<&str> = all.iter().map(|d| d.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(2.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 2.0);
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
