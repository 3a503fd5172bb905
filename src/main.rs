use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kuching::application::ports::{
    ArtifactStore, DocumentStore, JobQueue, JobRepository, TracingNotifier,
};
use kuching::application::services::{
    GenerationLoop, JobProcessor, QueueConsumer, ResponseExtractor,
};
use kuching::config::{Environment, Settings};
use kuching::infrastructure::model::AnthropicClient;
use kuching::infrastructure::observability::{TracingConfig, init_tracing};
use kuching::infrastructure::persistence::{InMemoryJobRepository, PgJobRepository};
use kuching::infrastructure::queue::InMemoryJobQueue;
use kuching::infrastructure::storage::LocalObjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default());

    let environment =
        Environment::try_from(std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()))
            .map_err(anyhow::Error::msg)?;
    let settings = Settings::from_env();

    if environment == Environment::Prod && settings.model.api_key.is_empty() {
        anyhow::bail!("MODEL_API_KEY is required in prod");
    }
    tracing::info!(environment = %environment, "Starting inference worker");

    let documents: Arc<dyn DocumentStore> = Arc::new(LocalObjectStore::new(PathBuf::from(
        &settings.storage.input_path,
    ))?);
    let artifacts: Arc<dyn ArtifactStore> = Arc::new(LocalObjectStore::new(PathBuf::from(
        &settings.storage.output_path,
    ))?);

    let jobs: Arc<dyn JobRepository> = match &settings.storage.database_url {
        Some(url) => {
            let pool = sqlx::PgPool::connect(url).await?;
            Arc::new(PgJobRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory job repository");
            Arc::new(InMemoryJobRepository::new())
        }
    };

    let model = Arc::new(AnthropicClient::new(settings.model.api_key.clone()));
    let extractor = ResponseExtractor::new(settings.delimiter_pair())?;
    let generation = GenerationLoop::new(model, extractor, settings.generation_config());

    let processor = Arc::new(JobProcessor::new(
        generation,
        documents,
        artifacts,
        jobs,
        Arc::new(TracingNotifier),
    ));

    let queue = Arc::new(InMemoryJobQueue::new());

    // Job-message JSON files given as arguments are enqueued for a local
    // run; the producer side of the queue is otherwise external.
    let mut seeded = 0usize;
    for arg in std::env::args().skip(1) {
        let body = std::fs::read_to_string(&arg)?;
        queue.enqueue(body);
        seeded += 1;
    }

    let consumer = QueueConsumer::new(
        Arc::clone(&queue) as Arc<dyn JobQueue>,
        processor,
        settings.worker.batch_size,
    );

    if seeded > 0 {
        tracing::info!(messages = seeded, "Draining seeded queue");
        while queue.pending() > 0 {
            let outcome = consumer.run_once().await?;
            if !outcome.failed.is_empty() {
                tracing::error!(failed = outcome.failed.len(), "Leaving failed messages queued");
                break;
            }
        }
    } else {
        consumer
            .run(Duration::from_secs(settings.worker.poll_interval_secs))
            .await;
    }

    Ok(())
}
