/// 工作器状态：`Idle → Connecting → ValidatingResponse → Streaming → 终态`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Connecting,
    ValidatingResponse,
    Streaming,
    Succeeded,
    Cancelled,
    Failed,
}

impl WorkerState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkerState::Succeeded | WorkerState::Cancelled | WorkerState::Failed
        )
    }
}
