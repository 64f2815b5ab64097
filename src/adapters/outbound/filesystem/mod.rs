/// Filesystem adapters for reading report documents
mod payload_reader;

pub use payload_reader::FileSystemPayloadReader;
