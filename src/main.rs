//! Demo harness: wires the enhancer to a static page surface and a
//! real run lister, then replays a scripted click sequence.
//!
//! `LISTER=fs|http` picks the listing backend, `CLICK_XS` is a
//! comma-separated list of click x coordinates, `CHART_WIDTH` /
//! `CHART_LEFT` shape the stub chart bounds.

use anyhow::Result;
use serde_json::Value;
use tokio::sync::mpsc;

use trendnav::chart::ChartBounds;
use trendnav::config::Config;
use trendnav::enhancer::Enhancer;
use trendnav::listing::ListerKind;
use trendnav::logging::{log, obj, v_str, Domain, Level};
use trendnav::notify::ConsoleNotifier;
use trendnav::page::{ClickEvent, StaticPage};

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn click_script() -> Vec<f64> {
    std::env::var("CLICK_XS")
        .map(|raw| {
            raw.split(',')
                .filter_map(|v| v.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "start",
        obj(&[(
            "config",
            serde_json::to_value(&cfg).unwrap_or(Value::Null),
        )]),
    );

    let lister = ListerKind::from_env().build(&cfg)?;
    let bounds = ChartBounds::new(
        env_f64("CHART_LEFT", 0.0),
        0.0,
        env_f64("CHART_WIDTH", 400.0),
        240.0,
    );
    let page = StaticPage::new(bounds);

    let (tx, mut rx) = mpsc::channel::<ClickEvent>(16);
    let script = click_script();
    tokio::spawn(async move {
        for x in script {
            let click = ClickEvent {
                client_x: x,
                client_y: 0.0,
            };
            if tx.send(click).await.is_err() {
                break;
            }
        }
    });

    let mut enhancer = Enhancer::new(cfg, page, lister, ConsoleNotifier);
    enhancer.run(&mut rx).await?;

    if let Some(url) = &enhancer.page.navigated_to {
        log(
            Level::Info,
            Domain::System,
            "exit",
            obj(&[("navigated_to", v_str(url))]),
        );
    }
    Ok(())
}
