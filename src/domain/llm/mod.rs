//! Generative provider domain models and traits

mod extract;
mod provider;
mod request;
mod response;

pub use extract::{Extraction, NO_RESPONSE_GENERATED};
pub use provider::GenerativeProvider;
pub use request::{Content, GenerateContentRequest, Part};
pub use response::{Candidate, CandidateContent, CandidatePart, GenerateContentResponse};

#[cfg(test)]
pub use provider::MockGenerativeProvider;
