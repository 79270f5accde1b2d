//! 自适应流读取：读失败时换更小的缓冲区从当前位置继续读，已发出的字节不重发。
//!
//! 网络较差时大块读取更容易超时，缩小单次读取量能提高取得进展的概率，代价是更多次读取。

use std::io;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::internal::chunk::traits::cancellation::CancellationProbe;
use crate::internal::chunk::traits::chunk_emitter::ChunkEmitter;

/// 默认缓冲区阶梯：64KB → 32KB → 1KB
pub const DEFAULT_BUFFER_LADDER: [usize; 3] = [64 * 1024, 32 * 1024, 1024];

/// 一次完整读取的结果。
#[derive(Debug)]
pub enum DrainOutcome {
    /// 读到流末尾
    Completed,
    /// 在检查点发现已取消
    Cancelled,
    /// 出口拒收数据
    Rejected,
    /// 所有缓冲区大小都因读错误而失败
    Exhausted {
        attempts: usize,
        last_error: Option<io::Error>,
    },
}

/// 自适应流读取器，状态只在一次运行内有效。
#[derive(Debug, Clone)]
pub struct AdaptiveStreamReader {
    ladder: Vec<usize>,
}

impl Default for AdaptiveStreamReader {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_LADDER)
    }
}

impl AdaptiveStreamReader {
    /// 按给定顺序尝试各缓冲区大小；大小为 0 的项会被忽略。
    pub fn new(ladder: impl Into<Vec<usize>>) -> Self {
        let mut ladder = ladder.into();
        ladder.retain(|size| *size > 0);
        Self { ladder }
    }

    pub fn ladder(&self) -> &[usize] {
        &self.ladder
    }

    /// 读取整个流，把每次读到的字节复制一份交给 `emitter`。
    ///
    /// 读错误会中止当前尝试，并用阶梯中的下一个缓冲区大小从流的当前位置重新开始。
    pub async fn drain<R, E>(
        &self,
        stream: &mut R,
        emitter: &mut E,
        cancel: &dyn CancellationProbe,
    ) -> DrainOutcome
    where
        R: AsyncRead + Unpin + ?Sized,
        E: ChunkEmitter + ?Sized,
    {
        let mut last_error = None;

        for &buffer_size in &self.ladder {
            match drain_with_buffer(stream, buffer_size, emitter, cancel).await {
                Ok(outcome) => return outcome,
                Err(e) => {
                    log::debug!("缓冲区 {} 字节读取失败，尝试更小的缓冲区: {}", buffer_size, e);
                    last_error = Some(e);
                }
            }
        }

        DrainOutcome::Exhausted {
            attempts: self.ladder.len(),
            last_error,
        }
    }
}

/// 用固定大小的缓冲区读到流末尾；读错误直接返回给上层换缓冲区。
async fn drain_with_buffer<R, E>(
    stream: &mut R,
    buffer_size: usize,
    emitter: &mut E,
    cancel: &dyn CancellationProbe,
) -> io::Result<DrainOutcome>
where
    R: AsyncRead + Unpin + ?Sized,
    E: ChunkEmitter + ?Sized,
{
    let mut scratch = vec![0u8; buffer_size];

    loop {
        let n = stream.read(&mut scratch).await?;
        if n == 0 {
            return Ok(DrainOutcome::Completed);
        }

        if cancel.is_cancelled() {
            return Ok(DrainOutcome::Cancelled);
        }

        // scratch 会被下一次读取覆盖，发出的必须是独立副本
        let chunk = Bytes::copy_from_slice(&scratch[..n]);
        if !emitter.emit(chunk).await {
            return Ok(DrainOutcome::Rejected);
        }
    }
}
