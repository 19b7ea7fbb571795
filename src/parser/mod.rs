mod event;
mod json;
mod link;

pub use event::{Coordinates, EventRecord, Location, Pricing, Source};
pub use json::{extract_json, extract_payload};
pub use link::{LinkCandidate, RejectedLink};
