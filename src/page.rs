//! The rendered-page surface the enhancer works against.
//!
//! A real implementation sits on a DOM (webview driver, embedded
//! browser); everything the enhancer needs from it is narrowed to this
//! trait so the component runs headlessly. `StaticPage` is the stub
//! implementation that makes integration explicit.

use anyhow::Result;

use crate::chart::ChartBounds;

/// Test-identifier attribute value that marks the trend widget.
pub const WIDGET_TEST_ID: &str = "trend";

/// Chart-element selectors probed inside the widget, in order.
pub const CHART_SELECTORS: [&str; 4] = ["canvas", "svg", ".recharts-wrapper", ".chart"];

/// Style rule registered once at attach time for the hint banner.
pub const PULSE_STYLE_RULE: &str = "@keyframes pulse {\n  0%, 100% { transform: scale(1); opacity: 1; }\n  50% { transform: scale(1.05); opacity: 0.8; }\n}";

/// Which of the known chart-library output shapes was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Canvas,
    Svg,
    RechartsWrapper,
    Generic,
}

impl ChartKind {
    pub fn selector(&self) -> &'static str {
        match self {
            ChartKind::Canvas => "canvas",
            ChartKind::Svg => "svg",
            ChartKind::RechartsWrapper => ".recharts-wrapper",
            ChartKind::Generic => ".chart",
        }
    }
}

/// Outcome of one discovery probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// No element with the trend test id yet.
    NoWidget,
    /// Widget present but no chart element inside it yet.
    NoChart,
    Chart(ChartKind),
}

/// A pointer click on the chart element, in page pixels.
#[derive(Debug, Clone, Copy)]
pub struct ClickEvent {
    pub client_x: f64,
    pub client_y: f64,
}

pub trait Page: Send {
    /// One discovery probe: widget by test id, then a chart element
    /// matching one of `CHART_SELECTORS` inside it.
    fn probe_chart(&mut self) -> ProbeResult;

    /// Rendered bounding box of the chart element.
    fn chart_bounds(&self) -> ChartBounds;

    /// Pointer cursor and tooltip on the chart element.
    fn apply_affordance(&mut self, tooltip: &str);

    /// Hint banner appended to the widget.
    fn append_banner(&mut self, text: &str);

    fn style_registered(&self) -> bool;

    /// Register `PULSE_STYLE_RULE`. Callers guard with
    /// `style_registered`, so a second call must not duplicate.
    fn register_pulse_style(&mut self);

    /// Point the page at `url`, replacing the current document.
    fn navigate(&mut self, url: &str) -> Result<()>;
}

// Stub implementation to make integration explicit.
pub struct StaticPage {
    widget_after: u32,
    chart_after: u32,
    probes: u32,
    kind: ChartKind,
    bounds: ChartBounds,
    pub tooltip: Option<String>,
    pub banner: Option<String>,
    pub pulse_style: Option<&'static str>,
    pub navigated_to: Option<String>,
}

impl StaticPage {
    /// A page whose widget and chart are present from the first probe.
    pub fn new(bounds: ChartBounds) -> Self {
        Self::appearing_after(0, 0, bounds)
    }

    /// A page whose widget appears after `widget_after` failed probes
    /// and whose chart appears after `chart_after` failed probes.
    pub fn appearing_after(widget_after: u32, chart_after: u32, bounds: ChartBounds) -> Self {
        Self {
            widget_after,
            chart_after: chart_after.max(widget_after),
            probes: 0,
            kind: ChartKind::Canvas,
            bounds,
            tooltip: None,
            banner: None,
            pulse_style: None,
            navigated_to: None,
        }
    }

    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    /// How many probes this page has answered.
    pub fn probes(&self) -> u32 {
        self.probes
    }
}

impl Page for StaticPage {
    fn probe_chart(&mut self) -> ProbeResult {
        self.probes += 1;
        if self.probes <= self.widget_after {
            ProbeResult::NoWidget
        } else if self.probes <= self.chart_after {
            ProbeResult::NoChart
        } else {
            ProbeResult::Chart(self.kind)
        }
    }

    fn chart_bounds(&self) -> ChartBounds {
        self.bounds
    }

    fn apply_affordance(&mut self, tooltip: &str) {
        self.tooltip = Some(tooltip.to_string());
    }

    fn append_banner(&mut self, text: &str) {
        self.banner = Some(text.to_string());
    }

    fn style_registered(&self) -> bool {
        self.pulse_style.is_some()
    }

    fn register_pulse_style(&mut self) {
        self.pulse_style = Some(PULSE_STYLE_RULE);
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigated_to = Some(url.to_string());
        Ok(())
    }
}
