use serde::Deserialize;

use crate::internal::chunk::functions::adaptive_reader::DEFAULT_BUFFER_LADDER;

/// 传输层缓冲读取的默认容量：64KB，与读取阶梯相互独立
pub const DEFAULT_TRANSPORT_BUFFER_CAPACITY: usize = 64 * 1024;

/// 默认同时运行的工作器数
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// 单个工作器的配置。连接/读取超时属于传输层常量，不在此处配置。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// 读取缓冲区阶梯（字节），按顺序尝试
    pub buffer_ladder: Vec<usize>,
    /// 响应体外层缓冲读取的容量（字节）
    pub transport_buffer_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            buffer_ladder: DEFAULT_BUFFER_LADDER.to_vec(),
            transport_buffer_capacity: DEFAULT_TRANSPORT_BUFFER_CAPACITY,
        }
    }
}

impl WorkerConfig {
    pub fn buffer_ladder(mut self, ladder: impl Into<Vec<usize>>) -> Self {
        self.buffer_ladder = ladder.into();
        self
    }

    pub fn transport_buffer_capacity(mut self, capacity: usize) -> Self {
        self.transport_buffer_capacity = capacity.max(1);
        self
    }
}

/// 工作器池的配置。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// 最多同时运行的工作器数
    pub max_workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl PoolConfig {
    pub fn max_workers(mut self, n: usize) -> Self {
        self.max_workers = n;
        self
    }
}
