//! Terminal driver and entry point.
//!
//! A thin runtime around the library: it reads commands from stdin, feeds
//! them to [`handle_event`], runs the resulting actions on tokio tasks, and
//! redraws the frame whenever the handler asks for it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              select! loop                │
//! │   stdin lines ──┐                        │
//! │   api responses ├──► Event ──► AppState  │
//! │   poll timer ───┘                │       │
//! │                                  ▼       │
//! │                               Actions    │
//! │                                  │       │
//! │      tokio::spawn(dispatcher) ◄──┘       │
//! │                │                         │
//! │                └─► response channel      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse arguments and config, initialize tracing, create `AppState`
//! 2. **Mount**: Send `ShowMagazine`, which loads filters and then the first page
//! 3. **Loop**: Handle commands, API responses and live-data ticks
//! 4. **Quit**: `quit` or end of input aborts in-flight list requests and exits

#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use green_atlas::api::{ApiClient, ApiDispatcher, ApiRequest, ApiResponse};
use green_atlas::app::parse_command;
use green_atlas::ui::helpers::CLEAR_SCREEN;
use green_atlas::{handle_event, Action, AppState, Config, Event};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the Green Atlas environmental-monitoring API")]
struct Args {
    /// TOML configuration file. Environment variables are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured API base URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Overrides the configured theme name.
    #[arg(long)]
    theme: Option<String>,

    /// Frame width in columns.
    #[arg(long, default_value_t = 100)]
    cols: usize,
}

/// Runtime wrapper around the library state.
struct Driver {
    app: AppState,
    dispatcher: Arc<ApiDispatcher>,
    responses: mpsc::UnboundedSender<ApiResponse>,

    /// In-flight filter and list requests, aborted when the list unmounts.
    pending: Vec<JoinHandle<()>>,

    cols: usize,
}

impl Driver {
    /// Handles one event, runs its actions and redraws if needed.
    fn update(&mut self, event: &Event) -> ControlFlow<()> {
        let span = tracing::debug_span!("driver_update", event_type = event_name(event));
        let _guard = span.entered();

        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");

                let mut flow = ControlFlow::Continue(());
                for action in actions {
                    if self.execute_action(action).is_break() {
                        flow = ControlFlow::Break(());
                    }
                }
                if should_render && flow.is_continue() {
                    self.render(None);
                }
                flow
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                ControlFlow::Continue(())
            }
        }
    }

    fn execute_action(&mut self, action: Action) -> ControlFlow<()> {
        match action {
            Action::Dispatch(request) => {
                let cancellable = matches!(request, ApiRequest::LoadFilters { .. } | ApiRequest::ListArticles { .. });
                let dispatcher = Arc::clone(&self.dispatcher);
                let responses = self.responses.clone();

                let handle = tokio::spawn(async move {
                    let response = dispatcher.handle_message(request).await;
                    let _ = responses.send(response);
                });

                if cancellable {
                    self.pending.retain(|handle| !handle.is_finished());
                    self.pending.push(handle);
                }
                ControlFlow::Continue(())
            }
            Action::CancelPending => {
                tracing::debug!(count = self.pending.len(), "aborting in-flight list requests");
                for handle in self.pending.drain(..) {
                    handle.abort();
                }
                ControlFlow::Continue(())
            }
            Action::Quit => ControlFlow::Break(()),
        }
    }

    /// Clears the screen and prints the current frame, plus an optional notice.
    fn render(&self, notice: Option<&str>) {
        let frame = green_atlas::ui::render(&self.app, self.cols);
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{CLEAR_SCREEN}{frame}");
        if let Some(notice) = notice {
            let _ = writeln!(stdout, "{notice}");
        }
        let _ = write!(stdout, "> ");
        let _ = stdout.flush();
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::SearchInput(_) => "SearchInput",
        Event::SubmitSearch => "SubmitSearch",
        Event::ClearSearch => "ClearSearch",
        Event::ClearAll => "ClearAll",
        Event::SelectCategory(_) => "SelectCategory",
        Event::SelectTag(_) => "SelectTag",
        Event::SelectSort(_) => "SelectSort",
        Event::PreviousPage => "PreviousPage",
        Event::NextPage => "NextPage",
        Event::ShowMagazine => "ShowMagazine",
        Event::ShowDashboard => "ShowDashboard",
        Event::ShowChat => "ShowChat",
        Event::ShowMap => "ShowMap",
        Event::RefreshDashboard => "RefreshDashboard",
        Event::PollLiveData => "PollLiveData",
        Event::SendChat(_) => "SendChat",
        Event::Quit => "Quit",
        Event::ApiResponse(_) => "ApiResponse",
    }
}

fn load_config(args: &Args) -> green_atlas::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };
    if let Some(api_url) = &args.api_url {
        config.api_url.clone_from(api_url);
    }
    if let Some(theme) = &args.theme {
        config.theme_name = Some(theme.clone());
        config.theme_file = None;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> green_atlas::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    green_atlas::observability::init_tracing(&config);

    let span = tracing::debug_span!("driver_load", api_url = %config.api_url);
    let (app, client) = {
        let _guard = span.entered();
        (green_atlas::initialize(&config), ApiClient::new(&config)?)
    };

    let (responses, mut response_rx) = mpsc::unbounded_channel();
    let mut driver = Driver {
        app,
        dispatcher: Arc::new(ApiDispatcher::new(client)),
        responses,
        pending: Vec::new(),
        cols: args.cols,
    };

    let period = Duration::from_secs(config.live_data_refresh_secs);
    let mut live_poll = interval_at(Instant::now() + period, period);
    live_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if driver.update(&Event::ShowMagazine).is_break() {
        return Ok(());
    }

    loop {
        let events = tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(events) if events.is_empty() => {
                        driver.render(None);
                        continue;
                    }
                    Ok(events) => events,
                    Err(e) => {
                        driver.render(Some(&format!("{e}")));
                        continue;
                    }
                },
                Ok(None) => vec![Event::Quit],
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read input");
                    vec![Event::Quit]
                }
            },
            Some(response) = response_rx.recv() => vec![Event::ApiResponse(response)],
            _ = live_poll.tick() => vec![Event::PollLiveData],
        };

        for event in events {
            if driver.update(&event).is_break() {
                println!();
                return Ok(());
            }
        }
    }
}
