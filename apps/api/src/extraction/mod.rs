// Candidate field extraction: contact, name, experience, AI signal, scoring.
// Extractors are independent of each other; `builder` sequences them per document.
// The only model-backed step (name) goes through ner_client.

pub mod builder;
pub mod contact;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod name;
pub mod scoring;
pub mod skills;

pub use builder::CandidateRecordBuilder;
pub use keywords::ExtractionKeywords;
