//! 取消探针：由调度方持有取消信号，工作器在检查点轮询。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

/// 协作式取消的查询接口。只被轮询，不会主动推送。
pub trait CancellationProbe: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

impl CancellationProbe for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

impl CancellationProbe for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<T: CancellationProbe + ?Sized> CancellationProbe for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// 永不取消，供不需要取消能力的调用方使用。
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationProbe for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}
