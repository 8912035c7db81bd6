//! `tasklist` command-line client.
//!
//! ```text
//! tasklist                                  show lists, tasks and films
//! tasklist add-list <title>
//! tasklist rename-list <id> <title>
//! tasklist delete-list <id>
//! tasklist add-task <list-id> <title>
//! tasklist set-status <list-id> <task-id> <new|in-progress|completed|draft>
//! tasklist delete-task <list-id> <task-id>
//! tasklist inspect                          dump the state as JSON
//! ```

use futures::future::join_all;
use tasklist_app::{app_store, view, AppEnvironment, Config, Interaction};
use tasklist_runtime::metrics::MetricsRecorder;
use tasklist_runtime::EffectHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let recorder = if config.metrics {
        Some(MetricsRecorder::install()?)
    } else {
        None
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inspect = args.first().is_some_and(|arg| arg == "inspect");
    let interaction = if inspect {
        None
    } else {
        Interaction::parse(args.as_slice())?
    };

    tracing::info!(base_url = %config.base_url, "Starting tasklist");
    let store = app_store(AppEnvironment::from_config(&config));

    let mut handles = view::mount(&store).await?;
    join_all(handles.iter_mut().map(EffectHandle::wait)).await;
    // Task fetches start only once the lists arrive
    store.settled().await;

    if let Some(interaction) = interaction {
        view::interact(&store, interaction).await?.wait().await;
        store.settled().await;
    }

    if inspect {
        println!("{}", serde_json::to_string_pretty(&view::inspect(&store).await?)?);
    } else {
        print!("{}", store.state(view::render).await);
    }

    if let Some(text) = recorder.as_ref().and_then(MetricsRecorder::render) {
        println!("\n{text}");
    }

    store.shutdown_default().await?;
    Ok(())
}
