//! 单分片下载错误类型。

use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::internal::transport::transport_error::TransportError;

use super::stream_outcome::FailureKind;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("无效的URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("传输失败: {0}")]
    Transport(#[from] TransportError),

    #[error("读取响应体失败，{attempts} 种缓冲区大小均已尝试: {last_error}")]
    ReadLadderExhausted { attempts: usize, last_error: String },

    /// 保留状态码与已发送的请求头，仅供诊断。
    #[error("服务器返回状态码 {status}，期望 {expected}")]
    UnexpectedStatus {
        status: u16,
        expected: u16,
        sent_headers: HeaderMap,
    },

    #[error("文件大小校验失败: 期望 {expected} 字节, 实际 {}", describe_size(.actual))]
    SizeMismatch { expected: u64, actual: Option<u64> },

    #[error("结果接收端拒绝写入偏移 {offset} 处的数据")]
    WriteRejected { offset: u64 },
}

fn describe_size(size: &Option<u64>) -> String {
    match size {
        Some(n) => format!("{} 字节", n),
        None => "未知".to_string(),
    }
}

impl ChunkError {
    /// 映射到对外上报的失败类别。
    pub fn kind(&self) -> FailureKind {
        match self {
            ChunkError::InvalidUrl { .. } => FailureKind::InvalidUrl,
            ChunkError::Transport(_) | ChunkError::ReadLadderExhausted { .. } => {
                FailureKind::Io
            }
            ChunkError::UnexpectedStatus { .. } => FailureKind::UnexpectedStatus,
            ChunkError::SizeMismatch { .. } => FailureKind::SizeMismatch,
            ChunkError::WriteRejected { .. } => FailureKind::WriteRejected,
        }
    }
}
