//! Comprehend Core: operation descriptors, request/response records, and output projection.

pub mod error;
pub mod operation;
pub mod outcome;
pub mod projection;
pub mod request;
pub mod response;

pub use error::{SelectorError, TransportError, ValidationError};
pub use operation::{FieldSpec, OperationDescriptor, OperationKind, UnknownOperation, DESCRIPTORS};
pub use outcome::InvocationOutcome;
pub use projection::Projection;
pub use request::{OperationRequest, RequestBuilder};
pub use response::OperationResponse;
