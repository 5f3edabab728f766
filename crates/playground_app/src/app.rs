use std::process::ExitCode;
use std::time::Duration;

use anyhow::bail;
use playground_core::{update, AppState, AppViewModel, Msg, PlaygroundConfig, ResponseState};
use playground_engine::EngineHandle;
use playground_logging::{playground_debug, playground_info};

use crate::cli::Args;
use crate::effects::EffectRunner;
use crate::{logging, render};

pub fn run_app(args: Args) -> anyhow::Result<ExitCode> {
    logging::initialize(args.log_to, args.log_level.into());

    let config = args.playground_config()?;
    let settings = args.fetch_settings(&config)?;
    playground_info!("Using API base {}", settings.base_url);
    let engine = EngineHandle::new(settings)?;

    let mut app = App::new(config, EffectRunner::new(engine));
    app.dispatch(Msg::Started);
    app.dispatch(Msg::SheetUrlChanged(args.sheet_url.clone()));
    app.dispatch(Msg::OffsetChanged(args.offset.clone()));
    app.dispatch(Msg::LimitChanged(args.limit.clone()));
    app.dispatch(Msg::RowChanged(args.row.clone()));
    app.dispatch(Msg::Submitted);
    app.run_until_settled(args.settle_timeout())?;

    let view = app.view();
    println!("{}", render::render(&view));
    Ok(match view.response {
        ResponseState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

/// Owns the state machine and feeds it messages one at a time.
pub struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    pub fn new(config: PlaygroundConfig, runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(config),
            runner,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            playground_debug!(
                "view changed searching={} response={:?}",
                view.searching,
                view.response
            );
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Pumps engine events until no effect is outstanding.
    pub fn run_until_settled(&mut self, timeout: Duration) -> anyhow::Result<()> {
        while !self.runner.is_idle() {
            match self.runner.next_msg(timeout) {
                Some(msg) => self.dispatch(msg),
                None => bail!("no answer from the API engine within {timeout:?}"),
            }
        }
        Ok(())
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }
}
