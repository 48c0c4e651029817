//! Turning a record and its analysis into panel output.

pub mod charts;
pub mod format;
pub mod html;
pub mod report;
pub mod slots;

pub use charts::{render_charts, wait_for_charts, ChartBackend, Charts, TextCharts};
pub use html::{render_panel, PanelView};
pub use report::text_report;
pub use slots::{slots, Content, Slot};
