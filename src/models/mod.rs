pub mod contact;

pub use contact::{ContactSubmission, MessageResponse, ValidSubmission};
