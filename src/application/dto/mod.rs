/// Data Transfer Objects for the application layer
mod raw_payload;

pub use raw_payload::RawPayload;
