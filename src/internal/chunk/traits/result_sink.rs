//! 结果接收端：由调度方实现，接收流式字节与唯一一次终态。
//!
//! 具体实现可以是写文件、内存收集、测试替身或跨运行时桥接，工作器不关心其身份。

use async_trait::async_trait;
use bytes::Bytes;

use crate::internal::chunk::structs::range_request_spec::ChunkRange;
use crate::internal::chunk::structs::stream_outcome::StreamOutcome;

/// 结果接收端。
///
/// 同一个接收端会被多个工作器并发调用（各自负责互不重叠的区间），实现不能假设只有单一写者。
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// 接收一段数据。`offset` 为该段在整个资源中的绝对偏移。
    ///
    /// 返回 `false` 表示写入失败：工作器会停止读取并以写入错误结束本次运行。
    async fn on_bytes(&self, offset: u64, data: Bytes) -> bool;

    /// 终态回调，每次运行至多一次；运行被外部取消时不会调用。
    async fn on_done(&self, outcome: &StreamOutcome, status_code: i32, range: ChunkRange);
}
