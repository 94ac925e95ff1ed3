pub mod schema;
pub mod values;
pub mod validation;
pub mod preview;
pub mod payload;
pub mod transport;
pub mod status;
pub mod controller;
pub mod config;
pub mod error;
pub mod logging;

pub use config::FormConfig;
pub use controller::{FormController, SubmitOutcome, SubmitState};
pub use error::{AppError, AppResult};
pub use preview::{PreviewHandle, PreviewManager};
pub use status::{StatusPhase, SubmissionStatus};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use validation::{validate, ErrorMap, FieldError, FieldErrorKind};
pub use values::{FieldValue, FileUpload, FormValues};
