//! The chart navigation enhancer: find the trend chart, make it
//! clickable, and turn clicks into archived-report navigation.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use crate::archive::ArchiveEntry;
use crate::chart::{resolve_click, ClickTarget};
use crate::config::Config;
use crate::listing::RunLister;
use crate::logging::{
    log_attached, log_click_mapped, log_fetch_error, log_navigate, log_probe_miss, log_runs_found,
};
use crate::notify::Notifier;
use crate::page::{ChartKind, ClickEvent, Page, ProbeResult};

pub const TOOLTIP_TEXT: &str = "Click on trend points to navigate to previous reports";
pub const BANNER_TEXT: &str = "Click on trend points to view previous reports";

pub const MSG_EMPTY_HISTORY: &str =
    "No previous runs available yet. Run tests multiple times to see history!";
pub const MSG_ALREADY_CURRENT: &str = "You are already viewing the current report!";
pub const MSG_FETCH_FAILED: &str =
    "Could not load previous runs. Make sure archives folder exists.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Searching,
    Attached,
}

/// What a handled click amounted to. Every arm is a terminal outcome;
/// only `Navigated` leaves the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    FetchFailed,
    EmptyHistory,
    AlreadyCurrent,
    Navigated(ArchiveEntry),
    Declined(ArchiveEntry),
    Ignored,
}

pub struct Enhancer<P: Page, L: RunLister, N: Notifier> {
    cfg: Config,
    pub page: P,
    pub lister: L,
    pub notifier: N,
    attached: bool,
}

impl<P: Page, L: RunLister, N: Notifier> Enhancer<P, L, N> {
    pub fn new(cfg: Config, page: P, lister: L, notifier: N) -> Self {
        Self {
            cfg,
            page,
            lister,
            notifier,
            attached: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.attached {
            Phase::Attached
        } else {
            Phase::Searching
        }
    }

    /// Poll the page until the widget and its chart element are both
    /// present, then attach. Returns whether attachment happened:
    /// `false` only when the configured attempt bound ran out.
    ///
    /// Attached is terminal. Once there, this returns immediately and
    /// no further probes are scheduled.
    pub async fn wait_for_chart(&mut self) -> bool {
        if self.attached {
            return true;
        }
        sleep(Duration::from_millis(self.cfg.initial_delay_ms)).await;
        let mut attempts: u32 = 0;
        loop {
            match self.page.probe_chart() {
                ProbeResult::Chart(kind) => {
                    self.attach(kind);
                    return true;
                }
                miss => {
                    attempts += 1;
                    log_probe_miss(
                        attempts,
                        match miss {
                            ProbeResult::NoWidget => "widget",
                            _ => "chart",
                        },
                    );
                    if self.cfg.max_probe_attempts > 0 && attempts >= self.cfg.max_probe_attempts {
                        return false;
                    }
                }
            }
            sleep(Duration::from_millis(self.cfg.poll_interval_ms)).await;
        }
    }

    fn attach(&mut self, kind: ChartKind) {
        if self.attached {
            return;
        }
        self.page.apply_affordance(TOOLTIP_TEXT);
        self.page.append_banner(BANNER_TEXT);
        if !self.page.style_registered() {
            self.page.register_pulse_style();
        }
        self.attached = true;
        log_attached(kind.selector());
    }

    /// The per-click contract: list runs, map the click, confirm,
    /// navigate. A listing failure is reported once and ends the
    /// interaction; the next click starts from scratch.
    pub async fn handle_click(&mut self, click: ClickEvent) -> Result<ClickOutcome> {
        let runs = match self.lister.list_runs().await {
            Ok(runs) => runs,
            Err(err) => {
                log_fetch_error(&format!("{:#}", err));
                self.notifier.notify_error(MSG_FETCH_FAILED);
                return Ok(ClickOutcome::FetchFailed);
            }
        };
        log_runs_found(runs.len());
        if runs.is_empty() {
            self.notifier.notify_info(MSG_EMPTY_HISTORY);
            return Ok(ClickOutcome::EmptyHistory);
        }

        let bounds = self.page.chart_bounds();
        let target = resolve_click(click.client_x, bounds, runs.len());
        log_click_mapped(click.client_x, runs.len() + 1, &format!("{:?}", target));

        match target {
            ClickTarget::Current => {
                self.notifier.notify_info(MSG_ALREADY_CURRENT);
                Ok(ClickOutcome::AlreadyCurrent)
            }
            ClickTarget::Archived(idx) => {
                let entry = runs[idx].clone();
                let prompt = format!("Navigate to report from {}?", entry.display_timestamp());
                let url = entry.index_url(&self.cfg.archives_path);
                if self.notifier.confirm(&prompt) {
                    log_navigate(&url, true);
                    self.page.navigate(&url)?;
                    Ok(ClickOutcome::Navigated(entry))
                } else {
                    log_navigate(&url, false);
                    Ok(ClickOutcome::Declined(entry))
                }
            }
            ClickTarget::Outside => Ok(ClickOutcome::Ignored),
        }
    }

    /// Attach, then handle clicks until the channel closes. Clicks are
    /// handled one at a time, so a slow listing fetch cannot stack
    /// prompts on top of each other.
    pub async fn run(&mut self, clicks: &mut mpsc::Receiver<ClickEvent>) -> Result<()> {
        if !self.wait_for_chart().await {
            return Ok(());
        }
        while let Some(click) = clicks.recv().await {
            self.handle_click(click).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartBounds;
    use crate::listing::FsRunLister;
    use crate::notify::RecordingNotifier;
    use crate::page::StaticPage;

    fn fast_config() -> Config {
        Config {
            initial_delay_ms: 0,
            poll_interval_ms: 1,
            max_probe_attempts: 0,
            archives_path: "archives".to_string(),
            archives_dir: "./archives".to_string(),
            base_url: None,
        }
    }

    fn bounds() -> ChartBounds {
        ChartBounds::new(0.0, 0.0, 400.0, 200.0)
    }

    #[tokio::test]
    async fn test_attached_is_terminal() {
        let mut enhancer = Enhancer::new(
            fast_config(),
            StaticPage::new(bounds()),
            FsRunLister::new("./archives"),
            RecordingNotifier::new(true),
        );
        assert_eq!(enhancer.phase(), Phase::Searching);
        assert!(enhancer.wait_for_chart().await);
        assert_eq!(enhancer.phase(), Phase::Attached);
        assert_eq!(enhancer.page.probes(), 1);

        // Re-entry does not probe or mutate the page again.
        assert!(enhancer.wait_for_chart().await);
        assert_eq!(enhancer.page.probes(), 1);
    }

    #[tokio::test]
    async fn test_attach_applies_affordances_and_style() {
        let mut enhancer = Enhancer::new(
            fast_config(),
            StaticPage::new(bounds()),
            FsRunLister::new("./archives"),
            RecordingNotifier::new(true),
        );
        assert!(enhancer.wait_for_chart().await);
        assert_eq!(enhancer.page.tooltip.as_deref(), Some(TOOLTIP_TEXT));
        assert_eq!(enhancer.page.banner.as_deref(), Some(BANNER_TEXT));
        assert!(enhancer.page.style_registered());
    }

    #[tokio::test]
    async fn test_bounded_probes_give_up() {
        let mut cfg = fast_config();
        cfg.max_probe_attempts = 3;
        let mut enhancer = Enhancer::new(
            cfg,
            StaticPage::appearing_after(10, 10, bounds()),
            FsRunLister::new("./archives"),
            RecordingNotifier::new(true),
        );
        assert!(!enhancer.wait_for_chart().await);
        assert_eq!(enhancer.phase(), Phase::Searching);
        assert_eq!(enhancer.page.probes(), 3);
    }

    #[tokio::test]
    async fn test_widget_without_chart_keeps_searching() {
        let mut cfg = fast_config();
        cfg.max_probe_attempts = 2;
        // Widget on the first probe, chart never.
        let mut enhancer = Enhancer::new(
            cfg,
            StaticPage::appearing_after(0, 10, bounds()),
            FsRunLister::new("./archives"),
            RecordingNotifier::new(true),
        );
        assert!(!enhancer.wait_for_chart().await);
        assert_eq!(enhancer.phase(), Phase::Searching);
    }
}
