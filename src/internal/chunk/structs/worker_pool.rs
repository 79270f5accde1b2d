//! 工作器池：由调度方创建并持有，限制同时运行的分片工作器数量。
//!
//! 每个工作器在独立的 tokio 任务中运行，先获取信号量许可再开始 HTTP 交换，
//! 因此不会阻塞调度方自身的控制流程。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use super::chunk_download_worker::ChunkDownloadWorker;
use super::chunk_run_report::ChunkRunReport;
use super::worker_config::PoolConfig;

#[derive(Debug, Error)]
pub enum PoolError {
    /// 池已关闭，工作器未运行，也没有回调接收端。
    #[error("工作器池已关闭")]
    Closed,

    #[error("工作器任务失败: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 固定容量的工作器池。
#[derive(Debug, Clone)]
pub struct ChunkWorkerPool {
    permits: Arc<Semaphore>,
    max_workers: usize,
}

impl Default for ChunkWorkerPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl ChunkWorkerPool {
    /// 按配置创建；容量至少为 1。
    pub fn new(config: PoolConfig) -> Self {
        let max_workers = config.max_workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// 当前空闲的运行名额。
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    /// 提交一个工作器。返回的句柄在工作器结束后给出运行报告。
    ///
    /// 必须在 tokio 运行时内调用。
    pub fn submit(
        &self,
        worker: ChunkDownloadWorker,
    ) -> JoinHandle<Result<ChunkRunReport, PoolError>> {
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            let _permit = permits.acquire_owned().await.map_err(|_| {
                log::debug!("工作器池已关闭，丢弃 {:?}", worker);
                PoolError::Closed
            })?;
            Ok(worker.run().await)
        })
    }

    /// 提交一个工作器并等待其结束。
    pub async fn run(
        &self,
        worker: ChunkDownloadWorker,
    ) -> Result<ChunkRunReport, PoolError> {
        self.submit(worker).await?
    }

    /// 关闭池：仍在排队的工作器以 [`PoolError::Closed`] 结束，正在运行的不受影响。
    pub fn shutdown(&self) {
        self.permits.close();
    }
}
