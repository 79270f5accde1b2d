use serde::Serialize;

/// 成功时上报的状态码
pub const SUCCESS_CODE: i32 = 200;
/// 被取消（仅出现在运行报告中，终态回调会被抑制）
pub const CANCELLED_CODE: i32 = -1;
/// 网络或传输错误，含读重试阶梯耗尽与超时
pub const IO_ERROR_CODE: i32 = -2;
/// URL 无效，未发起请求
pub const INVALID_URL_CODE: i32 = -3;
/// 结果接收端拒绝写入
pub const WRITE_ERROR_CODE: i32 = -4;
/// 文件大小校验失败
pub const SIZE_CHECK_FAILED_CODE: i32 = -5;

/// 失败类别：互斥且穷尽。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    InvalidUrl,
    Io,
    UnexpectedStatus,
    SizeMismatch,
    WriteRejected,
}

impl FailureKind {
    /// 写入被拒绝也归为 IO 类错误，只是单独上报。
    pub fn is_io_class(&self) -> bool {
        matches!(self, FailureKind::Io | FailureKind::WriteRejected)
    }
}

/// 单次运行的终态，每次运行恰好产生一个。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamOutcome {
    Success,
    Cancelled,
    Failed {
        kind: FailureKind,
        /// 已收到响应时的 HTTP 状态码
        http_status: Option<u16>,
    },
}

impl StreamOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StreamOutcome::Success)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            StreamOutcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// 交给 `on_done` 的状态码：成功为 200，状态码不符时为服务器实际状态码，其余为负数哨兵值。
    pub fn status_code(&self) -> i32 {
        match self {
            StreamOutcome::Success => SUCCESS_CODE,
            StreamOutcome::Cancelled => CANCELLED_CODE,
            StreamOutcome::Failed { kind, http_status } => match kind {
                FailureKind::InvalidUrl => INVALID_URL_CODE,
                FailureKind::Io => IO_ERROR_CODE,
                FailureKind::WriteRejected => WRITE_ERROR_CODE,
                FailureKind::SizeMismatch => SIZE_CHECK_FAILED_CODE,
                FailureKind::UnexpectedStatus => http_status
                    .map(i32::from)
                    .unwrap_or(SIZE_CHECK_FAILED_CODE),
            },
        }
    }
}
