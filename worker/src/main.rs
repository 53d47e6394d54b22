use anyhow::Result;
use clap::Parser;
use liveness::{
    application::usecases::liveness_upload::LivenessUploadUseCase,
    domain::{
        repositories::liveness_upload::LivenessUploadClient,
        value_objects::capture::CapturedClip,
    },
    infra::http::liveness_client::ReqwestLivenessClient,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use worker::{cli::Cli, config, liveness_uploading};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(error) = run().await {
        error!("Worker exited with error: {}", error);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    liveness::observability::init_observability("worker")?;

    let cli = Cli::parse();

    let dotenvy_env = config::config_loader::load()?;
    info!(config = ?dotenvy_env.liveness, "ENV has been loaded");

    let client: Arc<dyn LivenessUploadClient + Send + Sync> =
        Arc::new(ReqwestLivenessClient::new(dotenvy_env.http_client.clone())?);
    let usecase = Arc::new(LivenessUploadUseCase::new(client, dotenvy_env.liveness.clone()));

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, cancelling liveness uploads");
            ctrl_c_cancel.cancel();
        }
    });

    let (tx, rx) = mpsc::channel(dotenvy_env.capture_queue.capacity);
    let uploading_loop = tokio::spawn(liveness_uploading::worker::run(usecase, rx, cancel));

    // Stand-in for the capture surface: hand over each finished clip and
    // wait for its outcome before sending the next.
    let total = cli.clips.len();
    let mut failed = 0usize;
    for path in cli.clips {
        let (clip, outcome_rx) = CapturedClip::new(path.clone());
        if tx.send(clip).await.is_err() {
            warn!(path = %path.display(), "upload loop stopped before the clip was handed over");
            failed += 1;
            continue;
        }

        match outcome_rx.await {
            Ok(Ok(response)) => info!(
                path = %path.display(),
                status = %response.status,
                body = ?response.body.as_text(),
                "liveness response received"
            ),
            Ok(Err(err)) => {
                failed += 1;
                error!(
                    path = %path.display(),
                    kind = %err.kind(),
                    error = %err,
                    "liveness upload failed"
                );
            }
            Err(_) => {
                failed += 1;
                warn!(path = %path.display(), "upload loop stopped before replying");
            }
        }
    }
    drop(tx);

    uploading_loop.await??;

    info!(total, failed, "liveness uploads finished");
    if failed > 0 {
        anyhow::bail!("{} of {} liveness uploads failed", failed, total);
    }

    Ok(())
}
