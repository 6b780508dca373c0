pub mod coerce;
pub mod error;
pub mod loader;
pub mod models;
pub mod payloads;
pub mod table;
pub mod transform;

pub use coerce::CoercionFailure;
pub use error::{IngestError, SourceFault};
pub use loader::{load_and_normalize, load_raw_issues, IssueSource};
pub use models::{Event, Issue, State, INVALID_NUMBER};
pub use payloads::{EventPayload, IssuePayload};
pub use table::{IssueTable, LabelRow};
pub use transform::{derive_closing_event, normalize, parse_event, parse_issue};
