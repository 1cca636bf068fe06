pub mod backend;
pub mod file;
pub mod mic;
pub mod segment;

pub use backend::{AudioBackend, AudioBackendConfig, AudioBackendFactory, AudioFrame, AudioSource};
pub use file::FileBackend;
pub use mic::MicrophoneBackend;
pub use segment::{AudioSegment, SegmentBuilder};
