//! Common UI components shared by pages and forms

pub mod message;
pub mod spinner;

pub use message::{ErrorMessage, FieldError, FieldHint};
pub use spinner::{InlineSpinner, LoadingSpinner, Skeleton, Spinner, SpinnerSize};
