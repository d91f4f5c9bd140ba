#![forbid(unsafe_code)]

pub mod app_state;
pub mod auth;
pub mod clock;
pub mod drill;
pub mod error;
pub mod messages;

pub use app_state::{AppState, Screen};
pub use auth::{AuthFailure, AuthForm, AuthMode, AuthUser, Credentials};
pub use clock::Clock;
pub use error::{AppStateError, DrillServiceError};

pub use drill::{
    DrillEventSink, DrillOutcome, DrillService, RecordingSink, SetReport, SetReportId, SinkRecord,
    TracingSink,
};
