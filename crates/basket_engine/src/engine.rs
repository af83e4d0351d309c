use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use basket_logging::basket_debug;

use crate::fetch::{FetchSettings, ProductFetcher, ReqwestProductFetcher};
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    FetchCatalog { request_id: RequestId },
}

/// Runs catalog fetches on a background tokio runtime and reports results
/// over a channel, so callers never block on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Self::with_fetcher(Arc::new(ReqwestProductFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn ProductFetcher>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("basket-engine".to_string())
            .spawn(move || {
                // Exits once the handle (and with it `cmd_tx`) is dropped.
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_catalog(&self, request_id: RequestId) {
        basket_debug!("Queueing catalog fetch request_id={}", request_id);
        let _ = self
            .cmd_tx
            .send(EngineCommand::FetchCatalog { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn ProductFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchCatalog { request_id } => {
            let result = fetcher.fetch_products().await;
            let _ = event_tx.send(EngineEvent::CatalogFetched { request_id, result });
        }
    }
}
