//! Presentation state machine
//!
//! ```text
//! Landing --cta--> Intro --timer--> Search --record--> Detail
//!                                     ^                  |
//!                                     +------back--------+
//! ```
//!
//! The controller knows nothing about the network. Results arrive tagged
//! with the `RequestToken` handed out when the request started, and only the
//! most recently issued token may change the state.

use crate::record::SpeciesRecord;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Landing,
    Intro,
    Search,
    Detail(Box<SpeciesRecord>),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Intro => "intro",
            Self::Search => "search",
            Self::Detail(_) => "detail",
        }
    }

    pub fn record(&self) -> Option<&SpeciesRecord> {
        match self {
            Self::Detail(record) => Some(record),
            _ => None,
        }
    }
}

/// Tag for one search or detail request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub enum ViewEvent {
    CtaClicked,
    /// Fired by the intro timer; `generation` identifies which intro it belongs to
    IntroElapsed { generation: u64 },
    RecordReady {
        token: RequestToken,
        record: Box<SpeciesRecord>,
    },
    Back,
}

pub struct ViewController {
    state: ViewState,
    intro_duration: Duration,
    intro_generation: u64,
    intro_timer: Option<JoinHandle<()>>,
    latest_request: u64,
    events_tx: mpsc::UnboundedSender<ViewEvent>,
    events_rx: mpsc::UnboundedReceiver<ViewEvent>,
}

impl ViewController {
    pub fn new(intro_duration: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: ViewState::Landing,
            intro_duration,
            intro_generation: 0,
            intro_timer: None,
            latest_request: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Apply an event. Returns whether the state changed.
    pub fn handle(&mut self, event: ViewEvent) -> bool {
        let next = match event {
            ViewEvent::CtaClicked if matches!(self.state, ViewState::Landing) => {
                self.start_intro_timer();
                ViewState::Intro
            }
            ViewEvent::IntroElapsed { generation }
                if matches!(self.state, ViewState::Intro) && generation == self.intro_generation =>
            {
                self.intro_timer = None;
                ViewState::Search
            }
            ViewEvent::RecordReady { token, record } if self.is_current(token) => {
                self.cancel_intro_timer();
                ViewState::Detail(record)
            }
            ViewEvent::Back if matches!(self.state, ViewState::Detail(_)) => ViewState::Search,
            event => {
                debug!(state = self.state.name(), ?event, "Ignoring view event");
                return false;
            }
        };

        debug!(from = self.state.name(), to = next.name(), "View transition");
        self.state = next;
        true
    }

    pub fn click_cta(&mut self) -> bool {
        self.handle(ViewEvent::CtaClicked)
    }

    pub fn go_back(&mut self) -> bool {
        self.handle(ViewEvent::Back)
    }

    /// Issue a token for a new request, superseding all earlier ones
    pub fn begin_request(&mut self) -> RequestToken {
        self.latest_request += 1;
        RequestToken(self.latest_request)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest_request
    }

    /// Show a finished record if `token` is still the latest request
    pub fn show_record(&mut self, token: RequestToken, record: SpeciesRecord) -> bool {
        self.handle(ViewEvent::RecordReady {
            token,
            record: Box::new(record),
        })
    }

    /// Wait for the next timer event
    pub async fn next_event(&mut self) -> Option<ViewEvent> {
        self.events_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<ViewEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Tear down: the pending intro timer, if any, never fires.
    pub fn unmount(&mut self) {
        self.cancel_intro_timer();
    }

    fn start_intro_timer(&mut self) {
        self.cancel_intro_timer();

        let generation = self.intro_generation;
        let deadline = Instant::now() + self.intro_duration;
        let tx = self.events_tx.clone();
        self.intro_timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(ViewEvent::IntroElapsed { generation });
        }));
    }

    fn cancel_intro_timer(&mut self) {
        // a bumped generation also voids an event already sitting in the channel
        self.intro_generation += 1;
        if let Some(timer) = self.intro_timer.take() {
            timer.abort();
        }
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        if let Some(timer) = self.intro_timer.take() {
            timer.abort();
        }
    }
}
