//! 内存收集型结果接收端：把各工作器回传的分段与终态保存在内存中。

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use crate::internal::chunk::traits::result_sink::ResultSink;

use super::byte_segments::{ByteSegment, ByteSegments};
use super::range_request_spec::ChunkRange;
use super::stream_outcome::StreamOutcome;

/// 一次终态回调的记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoneRecord {
    pub outcome: StreamOutcome,
    pub status_code: i32,
    pub range: ChunkRange,
}

/// 可被多个工作器共享的内存接收端，始终接受写入。
#[derive(Debug, Default)]
pub struct CollectingSink {
    segments: Mutex<Vec<ByteSegment>>,
    done: Mutex<Vec<DoneRecord>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前收到的所有分段（按 offset 排序后的快照）。
    pub async fn segments(&self) -> ByteSegments {
        ByteSegments::new(self.segments.lock().await.clone())
    }

    /// 取走所有分段，接收端随后为空。
    pub async fn take_segments(&self) -> ByteSegments {
        let mut guard = self.segments.lock().await;
        ByteSegments::new(std::mem::take(&mut *guard))
    }

    /// 已收到的终态回调。
    pub async fn done_records(&self) -> Vec<DoneRecord> {
        self.done.lock().await.clone()
    }
}

#[async_trait]
impl ResultSink for CollectingSink {
    async fn on_bytes(&self, offset: u64, data: Bytes) -> bool {
        self.segments.lock().await.push(ByteSegment {
            offset,
            data: data.to_vec(),
        });
        true
    }

    async fn on_done(&self, outcome: &StreamOutcome, status_code: i32, range: ChunkRange) {
        self.done.lock().await.push(DoneRecord {
            outcome: *outcome,
            status_code,
            range,
        });
    }
}
