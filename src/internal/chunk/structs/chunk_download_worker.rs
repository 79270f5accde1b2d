//! 单分片下载工作器
//!
//! 一次运行只做一次 HTTP 交换：构建请求、校验响应、把响应体流式交给结果接收端，
//! 最后恰好上报一次终态（运行被外部取消时不上报）。
//!
//! ## 状态流转
//!
//! `Idle → Connecting → ValidatingResponse → Streaming → {Succeeded | Cancelled | Failed}`
//!
//! - **Connecting**：校验 URL，设置 `User-Agent`、禁用缓存、按需设置 `Range`，发送请求体（如有）
//! - **ValidatingResponse**：Range 请求必须是 206，整文件请求必须是 200；期望总大小大于 0 时校验总大小
//! - **Streaming**：响应体外包一层缓冲读取，交给 [`AdaptiveStreamReader`] 读完
//!
//! ## 取消
//!
//! 协作式取消，在以下检查点轮询：发起连接前、收到响应后、每次读到数据后、上报终态前。
//! 已交付的字节不会撤回；终态上报前若发现已取消则不再回调。
//!
//! ## 连接释放
//!
//! 响应体读取端只归本次运行所有，离开作用域即释放连接，任何分支都只释放一次。
//!
//! 工作器不可复用：`run` 会消费自身，重试由调度方新建工作器完成。

mod request;
mod sink_forwarder;
mod validate;

use std::sync::Arc;

use tokio::io::BufReader;

use crate::internal::chunk::functions::adaptive_reader::{
    AdaptiveStreamReader, DrainOutcome,
};
use crate::internal::chunk::traits::cancellation::CancellationProbe;
use crate::internal::chunk::traits::result_sink::ResultSink;
use crate::internal::transport::http_transport::HttpTransport;

use super::chunk_error::ChunkError;
use super::chunk_run_report::ChunkRunReport;
use super::range_request_spec::RangeRequestSpec;
use super::stream_outcome::StreamOutcome;
use super::worker_config::WorkerConfig;
use super::worker_state::WorkerState;
use request::build_request;
use sink_forwarder::SinkForwarder;
use validate::{validate_status, validate_total_size};

/// 交换正常结束（非错误）时的两种结果。
enum Completion {
    Finished,
    Cancelled,
}

/// 单分片下载工作器。
pub struct ChunkDownloadWorker {
    spec: RangeRequestSpec,
    transport: Arc<dyn HttpTransport>,
    sink: Arc<dyn ResultSink>,
    cancel: Arc<dyn CancellationProbe>,
    config: WorkerConfig,
    state: WorkerState,
    /// 收到响应后记录的 HTTP 状态码
    response_status: Option<u16>,
}

impl std::fmt::Debug for ChunkDownloadWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkDownloadWorker")
            .field("url", &self.spec.url())
            .field("range", &self.spec.chunk_range())
            .field("state", &self.state)
            .finish()
    }
}

impl ChunkDownloadWorker {
    pub fn new(
        spec: RangeRequestSpec,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn ResultSink>,
        cancel: Arc<dyn CancellationProbe>,
    ) -> Self {
        Self {
            spec,
            transport,
            sink,
            cancel,
            config: WorkerConfig::default(),
            state: WorkerState::Idle,
            response_status: None,
        }
    }

    /// 替换默认配置（读取阶梯、缓冲容量）。
    pub fn with_config(mut self, config: WorkerConfig) -> Self {
        self.config = config;
        self
    }

    /// 执行一次下载并上报终态，返回本次运行的报告。
    pub async fn run(mut self) -> ChunkRunReport {
        let range = self.spec.chunk_range();
        let mut forwarder = SinkForwarder::new(Arc::clone(&self.sink), range.start);

        let result = self.exchange(&mut forwarder).await;

        let (outcome, error) = match result {
            Ok(Completion::Finished) => {
                self.advance(WorkerState::Succeeded);
                (StreamOutcome::Success, None)
            }
            Ok(Completion::Cancelled) => {
                self.advance(WorkerState::Cancelled);
                (StreamOutcome::Cancelled, None)
            }
            Err(e) => {
                self.advance(WorkerState::Failed);
                let outcome = StreamOutcome::Failed {
                    kind: e.kind(),
                    http_status: self.response_status,
                };
                (outcome, Some(e))
            }
        };

        let status_code = outcome.status_code();

        // 取消优先：外部一旦请求取消，就不再上报终态
        let terminal_delivered = if self.cancel.is_cancelled() {
            log::debug!(
                "分片 {}-{:?} 已被取消，不再上报终态 {:?}",
                range.start,
                range.end,
                outcome
            );
            false
        } else {
            self.sink.on_done(&outcome, status_code, range).await;
            true
        };

        ChunkRunReport {
            outcome,
            status_code,
            range,
            bytes_delivered: forwarder.bytes_delivered(),
            terminal_delivered,
            final_state: self.state,
            error,
        }
    }

    /// 一次 HTTP 交换：连接、校验、读流。响应体在本函数内被 drop，连接随之释放。
    async fn exchange(
        &mut self,
        forwarder: &mut SinkForwarder,
    ) -> Result<Completion, ChunkError> {
        self.advance(WorkerState::Connecting);
        if self.cancel.is_cancelled() {
            return Ok(Completion::Cancelled);
        }

        let prepared = build_request(&mut self.spec)?;
        let sent_headers = prepared.headers.clone();
        let response = self.transport.execute(prepared).await.map_err(|e| {
            if e.is_timeout() {
                log::debug!("请求 {} 超时: {}", self.spec.url(), e);
            }
            ChunkError::from(e)
        })?;
        self.response_status = Some(response.head.status);

        if self.cancel.is_cancelled() {
            return Ok(Completion::Cancelled);
        }

        self.advance(WorkerState::ValidatingResponse);
        validate_status(&self.spec, &response.head, sent_headers)?;
        validate_total_size(&self.spec, &response.head)?;

        self.advance(WorkerState::Streaming);
        let mut body =
            BufReader::with_capacity(self.config.transport_buffer_capacity, response.body);
        let reader = AdaptiveStreamReader::new(self.config.buffer_ladder.clone());

        match reader.drain(&mut body, forwarder, self.cancel.as_ref()).await {
            DrainOutcome::Completed => Ok(Completion::Finished),
            DrainOutcome::Cancelled => Ok(Completion::Cancelled),
            DrainOutcome::Rejected => {
                log::warn!(
                    "{} 的结果接收端拒绝写入偏移 {}，停止读取",
                    self.spec.url(),
                    forwarder.next_offset()
                );
                Err(ChunkError::WriteRejected {
                    offset: forwarder.next_offset(),
                })
            }
            DrainOutcome::Exhausted {
                attempts,
                last_error,
            } => Err(ChunkError::ReadLadderExhausted {
                attempts,
                last_error: last_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "未配置读取缓冲区".to_string()),
            }),
        }
    }

    /// 状态前进；终态之后不再变化。
    fn advance(&mut self, next: WorkerState) {
        if self.state.is_terminal() {
            log::warn!("工作器已处于终态 {:?}，忽略切换到 {:?}", self.state, next);
            return;
        }
        log::debug!("{}: {:?} -> {:?}", self.spec.url(), self.state, next);
        self.state = next;
    }
}
