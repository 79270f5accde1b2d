//! 传输层错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("请求头非法: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl TransportError {
    /// 是否为超时（连接或读取），仅用于日志区分，上报时仍归为 IO 错误。
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout(),
            TransportError::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            TransportError::InvalidHeader(_) => false,
        }
    }
}
