//! Report export adapters - the two PDF paths.

mod chromium;
mod printpdf_renderer;

pub use chromium::ChromiumReportExporter;
pub use printpdf_renderer::PrintpdfReportRenderer;
