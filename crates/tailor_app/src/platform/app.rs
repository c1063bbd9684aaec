use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use tailor_core::{update, AppState, FileCandidate, Msg, RequestPhase, Route};
use tailor_engine::{describe_local_file, probe_service, EngineConfig, EngineError, EngineHandle};
use tailor_logging::{tailor_error, tailor_info, tailor_trace, tailor_warn};

use super::cli::{Cli, Command, RunArgs};
use super::effects::{candidate_for, EffectRunner};
use super::logging::{self, LogDestination};
use super::settings::{self, AppConfig};
use super::{editor, render};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = settings::load_config(cli.config.as_deref());
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };

    let destination = match cli.command {
        Command::Ping => LogDestination::Terminal,
        Command::Run(_) => LogDestination::Both(config.log_file()),
    };
    logging::initialize(destination, logging::level_for_verbosity(cli.verbose));
    if let Err(err) = &loaded {
        tailor_warn!("{:#}; using defaults", err);
    }

    match cli.command {
        Command::Ping => ping(&config, cli.service_url.as_deref()),
        Command::Run(args) => run_workflow(&config, cli.service_url.as_deref(), args),
    }
}

fn ping(config: &AppConfig, service_url: Option<&str>) -> anyhow::Result<ExitCode> {
    let service = config.service(service_url);
    match probe_service(service.clone()) {
        Ok(status) => {
            println!("{}: {} ({})", service.base_url, status.status, status.message);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} is not reachable: {}", service.base_url, err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_workflow(
    config: &AppConfig,
    service_url: Option<&str>,
    args: RunArgs,
) -> anyhow::Result<ExitCode> {
    let job_description = match (&args.job, &args.job_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read job description {}", path.display()))?,
        (None, None) => String::new(),
    };
    let candidates = args
        .resume
        .iter()
        .map(|path| describe_local_file(path).map(candidate_for))
        .collect::<Result<Vec<FileCandidate>, _>>()?;

    let engine = EngineHandle::new(EngineConfig {
        service: config.service(service_url),
        chromium_sandbox: config.chromium_sandbox(args.no_sandbox),
        ..EngineConfig::default_with_output(config.output_dir(args.output_dir.as_deref()))
    })?;
    let mut session = Session::new(EffectRunner::new(engine));

    session.dispatch(Msg::FilesDropped(candidates));
    session.dispatch(Msg::JobDescriptionChanged(job_description));
    session.dispatch(Msg::PrivacyToggled(!args.show_contact_details));

    if !session.state.can_submit() {
        if session.state.gate().held().is_none() {
            eprintln!("No PDF or DOCX resume among the given files.");
        } else {
            eprintln!("The job description is empty.");
        }
        return Ok(ExitCode::FAILURE);
    }

    session.dispatch(Msg::SubmitClicked);
    if let Err(err) = session.pump_while(|state| state.controller().is_pending()) {
        tailor_error!("optimization abandoned: {}", err);
        return Ok(ExitCode::FAILURE);
    }

    if let RequestPhase::Error(detail) = session.state.controller().phase() {
        tailor_info!("optimization failed: {}", detail);
        return Ok(ExitCode::FAILURE);
    }
    if session.navigated_to != Some(Route::Result) {
        tailor_error!("optimization settled without a document");
        return Ok(ExitCode::FAILURE);
    }

    if args.edit {
        if let Some(current) = session.state.store().current_content().map(str::to_owned) {
            match editor::edit_document(&current) {
                Ok(edited) => session.dispatch(Msg::DocumentCommitted(edited)),
                Err(err) => tailor_warn!("edit discarded: {:#}", err),
            }
        }
    }

    if args.no_export {
        if let Some(document) = session.state.store().current_content() {
            println!("{document}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    session.dispatch(Msg::ExportClicked);
    if let Err(err) = session.pump_while(|state| state.exports().is_busy()) {
        tailor_error!("export abandoned: {}", err);
        return Ok(ExitCode::FAILURE);
    }
    match session.state.exports().last_saved() {
        Some(_) => Ok(ExitCode::SUCCESS),
        None => Ok(ExitCode::FAILURE),
    }
}

/// One pass through the workflow: owns the state and feeds it messages.
struct Session {
    state: AppState,
    runner: EffectRunner,
    navigated_to: Option<Route>,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        println!("{}\n", render::render(&state.view()));
        Self {
            state,
            runner,
            navigated_to: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            println!("{}\n", render::render(&state.view()));
        }
        self.state = state;

        for route in self.runner.run(effects) {
            self.navigated_to = Some(route);
        }
    }

    /// Feeds engine events back into the state until `busy` turns false.
    /// Fails if the engine stops while work is still outstanding.
    fn pump_while(&mut self, busy: impl Fn(&AppState) -> bool) -> Result<(), EngineError> {
        while busy(&self.state) {
            match self.runner.next_msg(POLL_INTERVAL)? {
                Some(msg) => self.dispatch(msg),
                None => tailor_trace!("waiting for engine"),
            }
        }
        Ok(())
    }
}
