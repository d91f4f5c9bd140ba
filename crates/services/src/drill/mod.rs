mod report;
mod service;
mod sink;

pub use report::{SetReport, SetReportId};
pub use service::{DrillOutcome, DrillService};
pub use sink::{DrillEventSink, RecordingSink, SinkRecord, TracingSink};
