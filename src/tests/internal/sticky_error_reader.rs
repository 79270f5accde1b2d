use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use tokio::io::AsyncReadExt;

use crate::tests::{BodyStep, ScriptedBody};
use crate::transport::StickyErrorReader;

fn reader(steps: Vec<BodyStep>) -> StickyErrorReader<ScriptedBody> {
    StickyErrorReader::new(ScriptedBody::new(steps, Arc::new(AtomicUsize::new(0))))
}

#[tokio::test]
async fn error_repeats_instead_of_reading_past_it() {
    let mut body = reader(vec![
        BodyStep::Data(vec![1; 8]),
        BodyStep::Fail,
        BodyStep::Data(vec![2; 8]),
    ]);
    let mut buf = [0u8; 64];

    assert_eq!(body.read(&mut buf).await.unwrap(), 8);
    assert!(!body.has_failed());

    let first = body.read(&mut buf).await.unwrap_err();
    assert_eq!(first.kind(), std::io::ErrorKind::TimedOut);
    assert!(body.has_failed());

    // 底层流虽然还有数据，也不能再被读出
    for _ in 0..3 {
        let again = body.read(&mut buf).await.unwrap_err();
        assert_eq!(again.kind(), std::io::ErrorKind::TimedOut);
    }
}

#[tokio::test]
async fn healthy_stream_reads_to_end() {
    let mut body = reader(vec![BodyStep::Data(vec![3; 100])]);
    let mut out = Vec::new();

    body.read_to_end(&mut out).await.unwrap();

    assert_eq!(out, vec![3; 100]);
    assert!(!body.has_failed());
}

#[tokio::test]
async fn ladder_cannot_recover_from_a_sticky_error() {
    use crate::chunk::{AdaptiveStreamReader, DrainOutcome, NeverCancelled};
    use crate::tests::VecEmitter;

    let mut body = reader(vec![
        BodyStep::Data(vec![1; 10]),
        BodyStep::Fail,
        BodyStep::Data(vec![2; 10]),
    ]);
    let mut emitter = VecEmitter::default();

    let outcome = AdaptiveStreamReader::default()
        .drain(&mut body, &mut emitter, &NeverCancelled)
        .await;

    assert!(matches!(
        outcome,
        DrainOutcome::Exhausted { attempts: 3, .. }
    ));
    assert_eq!(emitter.joined(), vec![1; 10]);
}
