pub mod byte_segments;
pub mod chunk_download_worker;
pub mod chunk_error;
pub mod chunk_run_report;
pub mod collecting_sink;
pub mod range_request_spec;
pub mod stream_outcome;
pub mod worker_config;
pub mod worker_pool;
pub mod worker_state;

// 重导出公共类型
pub use byte_segments::{ByteSegment, ByteSegments};
pub use chunk_download_worker::ChunkDownloadWorker;
pub use chunk_error::ChunkError;
pub use chunk_run_report::ChunkRunReport;
pub use collecting_sink::{CollectingSink, DoneRecord};
pub use range_request_spec::{ChunkRange, RangeRequestSpec};
pub use stream_outcome::{FailureKind, StreamOutcome};
pub use worker_config::{PoolConfig, WorkerConfig};
pub use worker_pool::{ChunkWorkerPool, PoolError};
pub use worker_state::WorkerState;
