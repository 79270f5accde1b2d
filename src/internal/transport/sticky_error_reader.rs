//! 错误粘滞的响应体读取端。
//!
//! reqwest/hyper 的响应体出错后不能续读，下一次轮询只会报告流末尾。
//! 若不拦截，上层换更小缓冲区重试时会把「连接中断」误读成「正常读完」。

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// 第一次读错误之后，每次读取都返回同类错误，不再触碰底层流。
pub struct StickyErrorReader<R> {
    inner: R,
    /// 第一次失败的错误类别与描述
    failed: Option<(io::ErrorKind, String)>,
}

impl<R> StickyErrorReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            failed: None,
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failed.is_some()
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for StickyErrorReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if let Some((kind, message)) = &this.failed {
            return Poll::Ready(Err(io::Error::new(
                *kind,
                format!("响应体此前已读取失败: {}", message),
            )));
        }

        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(Err(e)) => {
                this.failed = Some((e.kind(), e.to_string()));
                Poll::Ready(Err(e))
            }
            other => other,
        }
    }
}
