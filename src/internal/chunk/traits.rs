pub mod cancellation;
pub mod chunk_emitter;
pub mod result_sink;

pub use cancellation::{CancellationProbe, NeverCancelled};
pub use chunk_emitter::ChunkEmitter;
pub use result_sink::ResultSink;
