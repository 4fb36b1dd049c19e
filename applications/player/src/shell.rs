//! Interactive shell
//!
//! One task owns the player. Input lines, clock ticks and finished catalog
//! lookups are multiplexed with `select!`. Every catalog lookup runs as a
//! spawned task, including playback started by navigation, playlist edits
//! and a track ending, so the prompt stays responsive while it is in flight.

use crate::clock::ClockHandle;
use crate::command::{Command, HELP};
use crate::error::{AppError, Result};
use crate::render;
use cloudtune_core::{SourceId, Track};
use cloudtune_playback::{
    Completion, ErrorKind, ListKind, PlayTicket, Player, SearchTicket,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Interval between clock ticks
const TICK: Duration = Duration::from_secs(1);

/// A finished catalog lookup, with the ticket it was started under
enum Lookup {
    Search(SearchTicket, cloudtune_core::Result<Vec<Track>>),
    Play(PlayTicket, cloudtune_core::Result<String>),
}

pub struct Shell {
    player: Player,
    clock: ClockHandle,
    sources: Vec<SourceId>,
    lookups: JoinSet<Lookup>,
}

impl Shell {
    pub fn new(player: Player, clock: ClockHandle, sources: Vec<SourceId>) -> Self {
        Self {
            player,
            clock,
            sources,
            lookups: JoinSet::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Sources used by `search`
    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        println!("{}", render::status(&self.player));
        prompt();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Command::parse(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => match self.execute(command) {
                            Ok(Some(output)) => println!("{output}"),
                            Ok(None) => {}
                            Err(e) => report(&e),
                        },
                        Ok(None) => {}
                        Err(e) => report(&e),
                    }
                    self.print_events();
                    prompt();
                }
                _ = ticker.tick() => {
                    self.advance(TICK.as_secs_f64());
                    self.print_events();
                }
                Some(joined) = self.lookups.join_next(), if !self.lookups.is_empty() => {
                    match joined {
                        Ok(lookup) => {
                            if let Err(e) = self.complete(lookup) {
                                report(&e);
                            }
                        }
                        Err(e) => warn!(error = %e, "Lookup task failed"),
                    }
                    self.print_events();
                }
            }
        }

        self.lookups.abort_all();
        Ok(())
    }

    /// Apply one command; returns text to show, if any
    pub fn execute(&mut self, command: Command) -> Result<Option<String>> {
        let output = match command {
            Command::Search(keyword) => {
                match self.player.begin_search(&keyword, &self.sources)? {
                    Some(ticket) => {
                        let message = format!("Searching for \"{}\"...", ticket.keyword());
                        self.spawn_search(ticket);
                        Some(message)
                    }
                    None => None,
                }
            }
            Command::Sources(sources) => {
                self.sources = sources;
                Some(self.describe_sources())
            }
            Command::Tab(tab) => {
                self.player.select_tab(tab);
                Some(render::list(&self.player, tab))
            }
            Command::List => Some(render::list(
                &self.player,
                self.player.library().active_tab(),
            )),
            Command::Play(row) => {
                let track = self.visible_row(row)?;
                let ticket = self.player.begin_play(track);
                self.spawn_play(ticket);
                None
            }
            Command::Add(row) => {
                let track = self.visible_row(row)?;
                let title = track.title.clone();
                let edit = self.player.begin_add_to_playlist(track);
                self.spawn_follow_up(edit.follow_up);
                if edit.changed {
                    None
                } else {
                    Some(format!("Already in playlist: {title}"))
                }
            }
            Command::Remove(row) => {
                let key = self.row(ListKind::Playlist, row)?.key();
                let edit = self.player.begin_remove_from_playlist(&key);
                self.spawn_follow_up(edit.follow_up);
                None
            }
            Command::Favorite(row) => {
                let track = self.visible_row(row)?;
                self.player.toggle_favorite(&track);
                None
            }
            Command::Toggle => {
                self.player.toggle_play_pause()?;
                None
            }
            Command::Seek(percent) => {
                if self.player.seek(percent / 100.0) {
                    Some(render::status(&self.player))
                } else {
                    Some("Nothing to seek in yet".to_string())
                }
            }
            Command::Volume(percent) => {
                self.player.set_volume(percent / 100.0);
                None
            }
            Command::Mute => {
                self.player.toggle_mute();
                None
            }
            Command::Next => {
                let ticket = self.player.begin_next();
                self.spawn_navigation(ticket)
            }
            Command::Previous => {
                let ticket = self.player.begin_previous();
                self.spawn_navigation(ticket)
            }
            Command::Status => Some(render::status(&self.player)),
            Command::Help => Some(HELP.to_string()),
            Command::Quit => None,
        };

        Ok(output)
    }

    /// Advance the simulated sink and feed its events to the player
    ///
    /// A track that ends starts the next lookup in the background.
    pub fn advance(&mut self, seconds: f64) {
        for event in self.clock.tick(seconds) {
            let follow_up = self.player.apply_sink_event(event);
            self.spawn_follow_up(follow_up);
        }
    }

    /// Number of catalog lookups still in flight
    pub fn pending_lookups(&self) -> usize {
        self.lookups.len()
    }

    /// Wait for every in-flight lookup and apply it
    pub async fn settle(&mut self) {
        while let Some(joined) = self.lookups.join_next().await {
            match joined {
                Ok(lookup) => {
                    if let Err(e) = self.complete(lookup) {
                        debug!(error = %e, "Lookup completed with error");
                    }
                }
                Err(e) => warn!(error = %e, "Lookup task failed"),
            }
        }
    }

    fn complete(&mut self, lookup: Lookup) -> Result<()> {
        let completion = match lookup {
            Lookup::Search(ticket, result) => self.player.finish_search(ticket, result)?,
            Lookup::Play(ticket, result) => self.player.finish_play(ticket, result)?,
        };
        if completion == Completion::Superseded {
            debug!("Ignored response to a superseded request");
        }
        Ok(())
    }

    fn spawn_search(&mut self, ticket: SearchTicket) {
        let catalog = self.player.catalog();
        self.lookups.spawn(async move {
            let result = catalog.search(ticket.keyword(), ticket.sources()).await;
            Lookup::Search(ticket, result)
        });
    }

    fn spawn_navigation(&mut self, ticket: Option<PlayTicket>) -> Option<String> {
        let completion = if ticket.is_some() {
            Completion::Applied
        } else {
            Completion::Ignored
        };
        self.spawn_follow_up(ticket);
        nothing_playing(completion)
    }

    fn spawn_follow_up(&mut self, ticket: Option<PlayTicket>) {
        if let Some(ticket) = ticket {
            self.spawn_play(ticket);
        }
    }

    fn spawn_play(&mut self, ticket: PlayTicket) {
        let catalog = self.player.catalog();
        self.lookups.spawn(async move {
            let result = catalog.stream_url(&ticket.key()).await;
            Lookup::Play(ticket, result)
        });
    }

    fn visible_row(&self, row: usize) -> Result<Track> {
        self.row(self.player.library().active_tab(), row).cloned()
    }

    fn row(&self, list: ListKind, row: usize) -> Result<&Track> {
        row.checked_sub(1)
            .and_then(|index| self.player.library().list(list).get(index))
            .ok_or_else(|| AppError::Command(format!("No row {row} in {list}")))
    }

    fn describe_sources(&self) -> String {
        if self.sources.is_empty() {
            return "Sources: none".to_string();
        }
        let names: Vec<&str> = self.sources.iter().map(SourceId::display_name).collect();
        format!("Sources: {}", names.join(", "))
    }

    fn print_events(&mut self) {
        for event in self.player.drain_events() {
            if let Some(line) = render::event(&event) {
                println!("{line}");
            }
        }
    }
}

fn nothing_playing(completion: Completion) -> Option<String> {
    match completion {
        Completion::Ignored => Some("Nothing to skip to".to_string()),
        Completion::Applied | Completion::Superseded => None,
    }
}

fn report(err: &AppError) {
    match err {
        // Playback failures already arrive as events
        AppError::Player(e) if e.kind() == ErrorKind::Playback => {}
        other => println!("Error: {other}"),
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
