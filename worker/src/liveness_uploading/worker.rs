use anyhow::Result;
use liveness::{
    application::usecases::liveness_upload::LivenessUploadUseCase,
    domain::value_objects::capture::CapturedClip,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Uploads captured clips one at a time until the capture side hangs up or
/// `cancel` fires. An in-flight upload is abandoned on cancellation.
pub async fn run(
    usecase: Arc<LivenessUploadUseCase>,
    mut captures: mpsc::Receiver<CapturedClip>,
    cancel: CancellationToken,
) -> Result<()> {
    info!("liveness_upload: starting worker loop");
    loop {
        let clip = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("liveness_upload: cancellation requested, stopping worker loop");
                break;
            }
            clip = captures.recv() => match clip {
                Some(clip) => clip,
                None => {
                    info!("liveness_upload: capture channel closed, stopping worker loop");
                    break;
                }
            },
        };

        let path = clip.file_path.display().to_string();
        let outcome = usecase
            .handle_capture(clip.file_path, cancel.child_token())
            .await;

        if let Some(reply) = clip.reply {
            if reply.send(outcome).is_err() {
                warn!(
                    path = %path,
                    "liveness_upload: capture side dropped before the outcome was delivered"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};
    use liveness::domain::{
        repositories::liveness_upload::MockLivenessUploadClient,
        value_objects::{
            liveness_upload::LivenessUploadConfig,
            upload_result::{LivenessResponse, UploadError, UploadFailureKind, UploadResult},
        },
    };
    use mockall::Sequence;
    use std::path::Path;
    use url::Url;

    fn ok_response(status: u16) -> UploadResult {
        Ok(LivenessResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Bytes::new(),
        ))
    }

    fn usecase(client: MockLivenessUploadClient) -> Arc<LivenessUploadUseCase> {
        Arc::new(LivenessUploadUseCase::new(
            Arc::new(client),
            LivenessUploadConfig::new(
                Url::parse("https://example.test/api/face/liveness").unwrap(),
                "tok123",
            ),
        ))
    }

    #[tokio::test]
    async fn uploads_clips_in_order_and_replies_to_each() {
        let mut seq = Sequence::new();
        let mut client = MockLivenessUploadClient::new();
        client
            .expect_upload()
            .withf(|request, _| request.file_path() == Path::new("/tmp/first.mp4"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ok_response(200));
        client
            .expect_upload()
            .withf(|request, _| request.file_path() == Path::new("/tmp/second.mp4"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(UploadError::file_read("video file /tmp/second.mp4 is empty")));

        let (tx, rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(run(usecase(client), rx, cancel.clone()));

        let (first, first_rx) = CapturedClip::new("/tmp/first.mp4");
        let (second, second_rx) = CapturedClip::new("/tmp/second.mp4");
        tx.send(first).await.unwrap();
        tx.send(second).await.unwrap();
        drop(tx);

        let first_outcome = first_rx.await.unwrap().unwrap();
        assert_eq!(first_outcome.status.as_u16(), 200);

        let second_outcome = second_rx.await.unwrap().unwrap_err();
        assert_eq!(second_outcome.kind(), UploadFailureKind::FileRead);

        worker.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn fire_and_forget_clips_are_still_uploaded() {
        let mut client = MockLivenessUploadClient::new();
        client
            .expect_upload()
            .times(1)
            .returning(|_, _| ok_response(500));

        let (tx, rx) = mpsc::channel(1);
        let worker = tokio::spawn(run(usecase(client), rx, CancellationToken::new()));

        tx.send(CapturedClip::fire_and_forget("/tmp/clip.mp4"))
            .await
            .unwrap();
        drop(tx);

        worker.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn dropped_reply_receiver_does_not_stop_the_loop() {
        let mut client = MockLivenessUploadClient::new();
        client
            .expect_upload()
            .times(2)
            .returning(|_, _| ok_response(200));

        let (tx, rx) = mpsc::channel(2);
        let worker = tokio::spawn(run(usecase(client), rx, CancellationToken::new()));

        let (abandoned, abandoned_rx) = CapturedClip::new("/tmp/first.mp4");
        drop(abandoned_rx);
        let (kept, kept_rx) = CapturedClip::new("/tmp/second.mp4");
        tx.send(abandoned).await.unwrap();
        tx.send(kept).await.unwrap();
        drop(tx);

        assert!(kept_rx.await.unwrap().is_ok());
        worker.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop_without_uploading() {
        let mut client = MockLivenessUploadClient::new();
        client.expect_upload().times(0);

        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        cancel.cancel();

        run(usecase(client), rx, cancel).await.unwrap();
        drop(tx);
    }
}
