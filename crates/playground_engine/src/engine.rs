use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use playground_core::{DataRequest, SubmissionId};
use playground_logging::playground_debug;

use crate::client::{FetchSettings, ReqwestSheetApi, SheetApi};
use crate::{EngineEvent, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    LoadServiceAccount,
    ResolveMeta {
        submission: SubmissionId,
        sheet_url: String,
    },
    FetchData {
        submission: SubmissionId,
        request: DataRequest,
    },
}

/// Runs API calls on a background tokio runtime. Each command becomes its own
/// task; results come back through [`EngineHandle::try_recv`] in settle order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let api = ReqwestSheetApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn SheetApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
            playground_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_service_account(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadServiceAccount);
    }

    pub fn resolve_meta(&self, submission: SubmissionId, sheet_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ResolveMeta {
            submission,
            sheet_url: sheet_url.into(),
        });
    }

    pub fn fetch_data(&self, submission: SubmissionId, request: DataRequest) {
        let _ = self.cmd_tx.send(EngineCommand::FetchData {
            submission,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn SheetApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadServiceAccount => EngineEvent::ServiceAccount(api.service_account().await),
        EngineCommand::ResolveMeta {
            submission,
            sheet_url,
        } => EngineEvent::MetaResolved {
            submission,
            outcome: api.resolve_sheet(&sheet_url).await,
        },
        EngineCommand::FetchData {
            submission,
            request,
        } => EngineEvent::DataFetched {
            submission,
            outcome: api.fetch_data(&request).await,
        },
    };
    let _ = event_tx.send(event);
}
