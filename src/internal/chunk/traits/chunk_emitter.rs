use async_trait::async_trait;
use bytes::Bytes;

/// 流读取器的分块出口。返回 `false` 表示拒收，读取器应立即停止。
#[async_trait]
pub trait ChunkEmitter: Send {
    async fn emit(&mut self, chunk: Bytes) -> bool;
}
