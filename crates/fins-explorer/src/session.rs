//! Interactive browse session
//!
//! Reads commands line by line while timer events and search results arrive
//! on channels. Every search runs as its own task tagged with a
//! `RequestToken`; results for superseded tokens are dropped.

use crate::error::{ExplorerError, Result};
use crate::featured::{load_featured, FeaturedSpecies, FEATURED_ENTRIES};
use crate::finder::{SearchOutcome, SpeciesFinder};
use crate::record::{SpeciesRecord, NOT_AVAILABLE};
use crate::render::{render_candidates, render_featured, render_record, DetailTab};
use crate::resolver::SearchCandidate;
use crate::view::{RequestToken, ViewController, ViewState};
use semantyfish_api::CatalogClient;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

const HELP: &str = "Commands:
  start              leave the landing screen
  <query>            search by species id, scientific name or genus
  pick <n>           open the n-th search result
  featured <n>       open the n-th featured species
  tab <name>         classification | biology | conservation | commercial | description
  back               return to the search screen
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Search(String),
    Pick(usize),
    Featured(usize),
    Tab(DetailTab),
    Back,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines give `Ok(None)`; anything that is
    /// not a keyword is a search query.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("start", "") => Self::Start,
            ("back", "") => Self::Back,
            ("help", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            ("pick", n) => Self::Pick(parse_index(n)?),
            ("featured", n) => Self::Featured(parse_index(n)?),
            ("tab", name) => Self::Tab(name.parse()?),
            ("search", query) if !query.is_empty() => Self::Search(query.to_string()),
            _ => Self::Search(line.to_string()),
        };
        Ok(Some(command))
    }
}

fn parse_index(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected a list number, got '{}'", raw)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Outcome {
    Search {
        token: RequestToken,
        result: Result<SearchOutcome>,
    },
    Opened {
        token: RequestToken,
        result: Result<SpeciesRecord>,
    },
    Featured(Vec<FeaturedSpecies>),
}

pub struct Session {
    client: CatalogClient,
    finder: SpeciesFinder,
    view: ViewController,
    tab: DetailTab,
    candidates: Vec<SearchCandidate>,
    featured: Vec<FeaturedSpecies>,
    pending: usize,
    outcomes_tx: mpsc::UnboundedSender<Outcome>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl Session {
    pub fn new(client: CatalogClient, intro_duration: Duration) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            finder: SpeciesFinder::new(client.clone()),
            client,
            view: ViewController::new(intro_duration),
            tab: DetailTab::default(),
            candidates: Vec::new(),
            featured: Vec::new(),
            pending: 0,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    /// Run until `quit`, or until input ends and nothing is outstanding.
    pub async fn run<R, W>(mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;
        self.render_screen(out)?;

        loop {
            if !input_open && self.pending == 0 && !matches!(self.view.state(), ViewState::Intro) {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => match Command::parse(&line) {
                        Ok(Some(command)) => {
                            if self.handle_command(command, out)? == Flow::Quit {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(msg) => writeln!(out, "{}", msg)?,
                    },
                    None => input_open = false,
                },
                Some(event) = self.view.next_event() => {
                    if self.view.handle(event) {
                        self.enter_search(out)?;
                    }
                }
                Some(outcome) = self.outcomes_rx.recv() => {
                    self.pending = self.pending.saturating_sub(1);
                    self.apply_outcome(outcome, out)?;
                }
            }
        }

        self.view.unmount();
        Ok(())
    }

    pub fn handle_command<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Start => {
                if self.view.click_cta() {
                    self.render_screen(out)?;
                } else {
                    writeln!(out, "Already started.")?;
                }
            }
            Command::Tab(tab) => {
                self.tab = tab;
                if let Some(record) = self.view.state().record() {
                    write!(out, "{}", render_record(record, tab))?;
                }
            }
            Command::Back => {
                if self.view.go_back() {
                    self.render_screen(out)?;
                }
            }
            Command::Search(query) if self.search_open() => {
                self.candidates.clear();
                let token = self.view.begin_request();
                let finder = self.finder.clone();
                writeln!(out, "Searching for \"{}\"...", query.trim())?;
                self.spawn(async move {
                    Outcome::Search {
                        token,
                        result: finder.search(&query).await,
                    }
                });
            }
            Command::Pick(n) if self.search_open() => match n.checked_sub(1).and_then(|i| self.candidates.get(i)) {
                Some(candidate) => {
                    let species_id = candidate.species_id;
                    let fallback = Some(candidate.common_name.clone())
                        .filter(|name| name != NOT_AVAILABLE);
                    self.open(species_id, fallback, out)?;
                }
                None => writeln!(out, "No search result number {}.", n)?,
            },
            Command::Featured(n) if self.search_open() => match n.checked_sub(1).and_then(|i| self.featured.get(i)) {
                Some(card) => {
                    let (id, name) = (card.id, card.common_name.clone());
                    self.open(id, Some(name), out)?;
                }
                None => writeln!(out, "No featured species number {}.", n)?,
            },
            Command::Search(_) | Command::Pick(_) | Command::Featured(_) => {
                writeln!(out, "The search screen is not open yet.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn search_open(&self) -> bool {
        matches!(self.view.state(), ViewState::Search | ViewState::Detail(_))
    }

    fn open<W: Write>(&mut self, species_id: u64, fallback: Option<String>, out: &mut W) -> Result<()> {
        let token = self.view.begin_request();
        let finder = self.finder.clone();
        writeln!(out, "Loading species {}...", species_id)?;
        self.spawn(async move {
            Outcome::Opened {
                token,
                result: finder.open(species_id, fallback.as_deref()).await,
            }
        });
        Ok(())
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = Outcome> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    fn enter_search<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let client = self.client.clone();
        self.spawn(async move { Outcome::Featured(load_featured(&client, FEATURED_ENTRIES).await) });
        self.render_screen(out)
    }

    fn apply_outcome<W: Write>(&mut self, outcome: Outcome, out: &mut W) -> Result<()> {
        let (token, result) = match outcome {
            Outcome::Featured(cards) => {
                self.featured = cards;
                if matches!(self.view.state(), ViewState::Search) {
                    write!(out, "{}", render_featured(&self.featured))?;
                }
                return Ok(());
            }
            Outcome::Search { token, result } => (token, result),
            Outcome::Opened { token, result } => (token, result.map(|r| SearchOutcome::Record(Box::new(r)))),
        };

        if !self.view.is_current(token) {
            debug!(?token, "Dropping result of a superseded request");
            return Ok(());
        }

        match result {
            Ok(SearchOutcome::Record(record)) => {
                self.tab = DetailTab::default();
                self.view.show_record(token, *record);
                self.render_screen(out)?;
            }
            Ok(SearchOutcome::Candidates(candidates)) => {
                write!(out, "{}", render_candidates(&candidates))?;
                writeln!(out, "Use 'pick <n>' to open one.")?;
                self.candidates = candidates;
            }
            Err(e) => report(out, &e)?,
        }
        Ok(())
    }

    fn render_screen<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.view.state() {
            ViewState::Landing => {
                writeln!(out, "FINS - Fish index Search Engine")?;
                writeln!(out, "Type 'start' to begin, 'help' for commands.")?;
            }
            ViewState::Intro => writeln!(out, "Diving in...")?,
            ViewState::Search => {
                writeln!(out, "Search by species id, scientific name or genus.")?;
                if !self.featured.is_empty() {
                    write!(out, "{}", render_featured(&self.featured))?;
                }
            }
            ViewState::Detail(record) => write!(out, "{}", render_record(record, self.tab))?,
        }
        Ok(())
    }
}

fn report<W: Write>(out: &mut W, e: &ExplorerError) -> Result<()> {
    writeln!(out, "Search failed: {}", e)?;
    Ok(())
}
