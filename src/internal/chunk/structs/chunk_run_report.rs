use super::chunk_error::ChunkError;
use super::range_request_spec::ChunkRange;
use super::stream_outcome::StreamOutcome;
use super::worker_state::WorkerState;

/// 单次运行的报告，无论终态回调是否被取消抑制都会返回给调用方。
#[derive(Debug)]
pub struct ChunkRunReport {
    pub outcome: StreamOutcome,
    /// 与 `on_done` 相同的状态码
    pub status_code: i32,
    pub range: ChunkRange,
    /// 已成功交给接收端的字节数
    pub bytes_delivered: u64,
    /// 是否真正调用了 `on_done`
    pub terminal_delivered: bool,
    pub final_state: WorkerState,
    /// 失败时的详细错误
    pub error: Option<ChunkError>,
}

impl ChunkRunReport {
    /// 下一个待写入的绝对偏移。
    pub fn next_offset(&self) -> u64 {
        self.range.start + self.bytes_delivered
    }
}
