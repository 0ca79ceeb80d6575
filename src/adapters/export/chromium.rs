//! Headless-Chromium report exporter.
//!
//! Produces a pixel-accurate PDF of the already-rendered HTML report view
//! by driving a transient browser over CDP:
//!
//! 1. launch a headless browser (one process per export call)
//! 2. replay the caller's session cookies into the fresh context
//! 3. navigate and wait for the `[data-report-loaded]` marker and the
//!    `.report-page` page-boundary class
//! 4. wait for every image to finish loading, bounded
//! 5. inject print CSS overrides (zero margins, pinned footers) so no
//!    blank trailing page is emitted
//! 6. poll the page-boundary count until it stabilizes or matches the
//!    expected count in `data-expected-pages`
//! 7. resize the viewport to the measured content height
//! 8. switch to print-media emulation
//! 9. print to PDF (A4, zero margins, backgrounds on)
//!
//! The browser process is closed on every exit path. A missing loaded
//! marker only logs a warning; never seeing a page boundary is fatal
//! because there is nothing to print.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetDeviceMetricsOverrideParams, SetEmulatedMediaParams,
};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;

use crate::config::ExportConfig;
use crate::ports::{ExportError, ExportRequest, ReportExporter, SessionCookie};

/// DOM marker set by the report view once its data has loaded.
const LOADED_MARKER: &str = "[data-report-loaded]";

/// CSS class on each fixed-size report page.
const PAGE_BOUNDARY: &str = ".report-page";

/// Consecutive equal page-count reads required to call the layout stable.
const STABLE_READS: usize = 3;

/// Maximum stability polls (at the configured interval, ~10s by default).
const MAX_POLLS: usize = 20;

/// Poll cadence for selector and image waits.
const WAIT_PROBE_INTERVAL: Duration = Duration::from_millis(250);

/// A4 paper size in inches for `Page.printToPDF`.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// Print CSS injected before printing: zero out page margins and pin the
/// per-page footer so the last page does not overflow into a blank one.
const PRINT_CSS: &str = r#"
@page { margin: 0; }
html, body { margin: 0 !important; padding: 0 !important; }
.report-page { page-break-after: always; break-inside: avoid; margin: 0 !important; }
.report-page:last-child { page-break-after: auto; }
.report-footer { position: absolute; bottom: 0; left: 0; right: 0; }
"#;

/// Headless-browser implementation of the ReportExporter port.
pub struct ChromiumReportExporter {
    config: ExportConfig,
}

impl ChromiumReportExporter {
    /// Creates an exporter with the given export configuration.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig, ExportError> {
        let mut builder = BrowserConfig::builder().no_sandbox().window_size(1280, 1024);
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(ExportError::BrowserLaunch)
    }

    /// The whole pipeline against an open page; teardown stays in
    /// `export_pdf` so it runs on every exit path.
    async fn run_pipeline(
        &self,
        page: &Page,
        request: &ExportRequest,
    ) -> Result<Vec<u8>, ExportError> {
        // (b) replay session cookies so the view renders authorized.
        if !request.cookies.is_empty() {
            let cookies = request
                .cookies
                .iter()
                .map(cookie_param)
                .collect::<Result<Vec<_>, _>>()?;
            page.set_cookies(cookies)
                .await
                .map_err(|e| ExportError::Navigation(e.to_string()))?;
        }

        // (c) navigate and wait for render markers.
        page.goto(request.report_url.as_str())
            .await
            .map_err(|e| ExportError::Navigation(e.to_string()))?;

        let nav = tokio::time::timeout(
            self.config.selector_timeout(),
            page.wait_for_navigation(),
        )
        .await;
        match nav {
            Ok(Err(e)) => return Err(ExportError::Navigation(e.to_string())),
            Err(_) => {
                // Availability over completeness: a busy network-idle
                // signal must not block the export.
                tracing::warn!(url = %request.report_url, "Navigation wait timed out, continuing");
            }
            Ok(Ok(_)) => {}
        }

        if !self
            .wait_for_selector(page, LOADED_MARKER, self.config.selector_timeout())
            .await?
        {
            tracing::warn!(
                url = %request.report_url,
                marker = LOADED_MARKER,
                "Report loaded marker never appeared, continuing"
            );
        }

        if !self
            .wait_for_selector(page, PAGE_BOUNDARY, self.config.selector_timeout())
            .await?
        {
            return Err(ExportError::ReportNotRendered);
        }

        // (d) every image loaded, or the fixed budget spent.
        self.wait_for_images(page).await?;

        // (e) print CSS overrides.
        inject_style(page, PRINT_CSS).await?;

        // (f) page-count stability.
        let page_count = self.wait_for_stable_page_count(page).await?;
        if page_count == 0 {
            return Err(ExportError::ReportNotRendered);
        }
        tracing::debug!(pages = page_count, "Report pagination stabilized");

        // (g) viewport matches the full content height so nothing lazy
        // stays unrendered below the fold.
        let content_height: i64 = evaluate(page, "document.documentElement.scrollHeight").await?;
        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(1280)
            .height(content_height.max(1024))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(ExportError::PdfGeneration)?;
        page.execute(metrics)
            .await
            .map_err(|e| ExportError::PdfGeneration(e.to_string()))?;

        // (h) print-media emulation.
        page.execute(SetEmulatedMediaParams::builder().media("print").build())
            .await
            .map_err(|e| ExportError::PdfGeneration(e.to_string()))?;

        // (i) the actual print.
        let params = PrintToPdfParams::builder()
            .landscape(false)
            .display_header_footer(false)
            .print_background(true)
            .paper_width(A4_WIDTH_IN)
            .paper_height(A4_HEIGHT_IN)
            .margin_top(0.0)
            .margin_bottom(0.0)
            .margin_left(0.0)
            .margin_right(0.0)
            .prefer_css_page_size(true)
            .build();

        page.pdf(params)
            .await
            .map_err(|e| ExportError::PdfGeneration(e.to_string()))
    }

    /// Polls for a selector until it exists or the budget runs out.
    /// Returns whether the selector ever appeared.
    async fn wait_for_selector(
        &self,
        page: &Page,
        selector: &str,
        budget: Duration,
    ) -> Result<bool, ExportError> {
        let expr = format!("document.querySelector('{}') !== null", selector);
        let deadline = tokio::time::Instant::now() + budget;
        loop {
            if evaluate::<bool>(page, &expr).await? {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(WAIT_PROBE_INTERVAL).await;
        }
    }

    /// Waits until every `<img>` has settled (load or error), bounded by
    /// the configured image budget. Timing out only logs.
    async fn wait_for_images(&self, page: &Page) -> Result<(), ExportError> {
        let deadline = tokio::time::Instant::now() + self.config.image_timeout();
        loop {
            let settled: bool =
                evaluate(page, "Array.from(document.images).every(img => img.complete)").await?;
            if settled {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!("Images still loading at budget, continuing");
                return Ok(());
            }
            tokio::time::sleep(WAIT_PROBE_INTERVAL).await;
        }
    }

    /// Polls the `.report-page` count until it is stable for
    /// [`STABLE_READS`] consecutive reads, matches the expected count in
    /// `data-expected-pages`, or [`MAX_POLLS`] polls have elapsed.
    /// Returns the last observed count.
    async fn wait_for_stable_page_count(&self, page: &Page) -> Result<i64, ExportError> {
        let count_expr = format!("document.querySelectorAll('{}').length", PAGE_BOUNDARY);
        let expected_expr = "Number(document.querySelector('[data-expected-pages]')\
                             ?.getAttribute('data-expected-pages') ?? 0)";

        let expected: i64 = evaluate(page, expected_expr).await.unwrap_or(0);
        let mut window = StabilityWindow::new(STABLE_READS);
        let mut count = 0;

        for _ in 0..MAX_POLLS {
            count = evaluate(page, &count_expr).await?;
            if expected > 0 && count == expected {
                return Ok(count);
            }
            if window.push(count) && count > 0 {
                return Ok(count);
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }

        tracing::warn!(
            pages = count,
            expected,
            "Page count never stabilized, printing what rendered"
        );
        Ok(count)
    }
}

#[async_trait]
impl ReportExporter for ChromiumReportExporter {
    async fn export_pdf(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        // (a) one transient browser per export call.
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| ExportError::BrowserLaunch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = match browser.new_page("about:blank").await {
            Ok(page) => self.run_pipeline(&page, request).await,
            Err(e) => Err(ExportError::BrowserLaunch(e.to_string())),
        };

        // Teardown runs on success and failure alike; the browser is a
        // child process, not a pool member.
        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "Browser close failed");
        }
        let _ = browser.wait().await;
        handler_task.abort();

        result
    }
}

/// Maps a session cookie into the CDP cookie parameter.
fn cookie_param(cookie: &SessionCookie) -> Result<CookieParam, ExportError> {
    CookieParam::builder()
        .name(&cookie.name)
        .value(&cookie.value)
        .domain(&cookie.domain)
        .path(&cookie.path)
        .secure(cookie.secure)
        .http_only(cookie.http_only)
        .build()
        .map_err(ExportError::Navigation)
}

/// Appends a `<style>` element with the given CSS to the document head.
async fn inject_style(page: &Page, css: &str) -> Result<(), ExportError> {
    let js = format!(
        "(() => {{ const s = document.createElement('style'); \
         s.textContent = {}; document.head.appendChild(s); return true; }})()",
        serde_json::to_string(css).unwrap_or_default()
    );
    evaluate::<bool>(page, &js).await?;
    Ok(())
}

async fn evaluate<T: serde::de::DeserializeOwned>(
    page: &Page,
    expr: &str,
) -> Result<T, ExportError> {
    page.evaluate(expr)
        .await
        .map_err(|e| ExportError::Navigation(e.to_string()))?
        .into_value()
        .map_err(|e| ExportError::Navigation(e.to_string()))
}

/// Sliding window that reports stability after N consecutive equal reads.
struct StabilityWindow {
    required: usize,
    last: Option<i64>,
    streak: usize,
}

impl StabilityWindow {
    fn new(required: usize) -> Self {
        Self {
            required,
            last: None,
            streak: 0,
        }
    }

    /// Records a read; true once the same value has been seen
    /// `required` times in a row.
    fn push(&mut self, value: i64) -> bool {
        if self.last == Some(value) {
            self.streak += 1;
        } else {
            self.last = Some(value);
            self.streak = 1;
        }
        self.streak >= self.required
    }
}
