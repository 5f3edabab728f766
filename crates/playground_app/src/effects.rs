use std::time::Duration;

use playground_core::{Effect, Msg};
use playground_engine::{EngineEvent, EngineHandle};
use playground_logging::{playground_debug, playground_info, playground_warn, snippet};

/// Hands core effects to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    outstanding: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            outstanding: 0,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.outstanding += 1;
            match effect {
                Effect::LoadServiceAccount => {
                    playground_debug!("LoadServiceAccount");
                    self.engine.load_service_account();
                }
                Effect::ResolveMeta {
                    submission,
                    sheet_url,
                } => {
                    playground_info!(
                        "ResolveMeta submission={} url_len={} url={}",
                        submission,
                        sheet_url.len(),
                        snippet(&sheet_url)
                    );
                    self.engine.resolve_meta(submission, sheet_url);
                }
                Effect::FetchData {
                    submission,
                    request,
                } => {
                    playground_info!(
                        "FetchData submission={} api_url={}",
                        submission,
                        request.api_url
                    );
                    self.engine.fetch_data(submission, request);
                }
            }
        }
    }

    /// True when every enqueued effect has reported back.
    pub fn is_idle(&self) -> bool {
        self.outstanding == 0
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        self.outstanding = self.outstanding.saturating_sub(1);
        Some(map_event(event))
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ServiceAccount(Ok(email)) => Msg::ServiceAccountLoaded(Some(email)),
        EngineEvent::ServiceAccount(Err(err)) => {
            playground_warn!("Service account lookup failed: {}", err);
            Msg::ServiceAccountLoaded(None)
        }
        EngineEvent::MetaResolved {
            submission,
            outcome,
        } => Msg::MetaResolved {
            submission,
            outcome,
        },
        EngineEvent::DataFetched {
            submission,
            outcome,
        } => Msg::DataFetched {
            submission,
            outcome,
        },
    }
}
