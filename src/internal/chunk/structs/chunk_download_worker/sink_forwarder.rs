use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::internal::chunk::traits::chunk_emitter::ChunkEmitter;
use crate::internal::chunk::traits::result_sink::ResultSink;

/// 把读取器发出的分块转交给结果接收端，并维护本次运行的已交付字节数。
///
/// 每段的绝对偏移 = `range_start + bytes_delivered`，接收端无需自行推算。
pub(super) struct SinkForwarder {
    sink: Arc<dyn ResultSink>,
    range_start: u64,
    bytes_delivered: u64,
}

impl SinkForwarder {
    pub(super) fn new(sink: Arc<dyn ResultSink>, range_start: u64) -> Self {
        Self {
            sink,
            range_start,
            bytes_delivered: 0,
        }
    }

    pub(super) fn bytes_delivered(&self) -> u64 {
        self.bytes_delivered
    }

    pub(super) fn next_offset(&self) -> u64 {
        self.range_start + self.bytes_delivered
    }
}

#[async_trait]
impl ChunkEmitter for SinkForwarder {
    async fn emit(&mut self, chunk: Bytes) -> bool {
        let len = chunk.len() as u64;
        let accepted = self.sink.on_bytes(self.next_offset(), chunk).await;
        if accepted {
            self.bytes_delivered += len;
        }
        accepted
    }
}
