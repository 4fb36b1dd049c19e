//! Shell command parsing

use crate::error::{AppError, Result};
use cloudtune_core::SourceId;
use cloudtune_playback::ListKind;

/// One line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Sources(Vec<SourceId>),
    Tab(ListKind),
    List,
    /// 1-based row in the visible list
    Play(usize),
    Add(usize),
    /// 1-based row in the playlist
    Remove(usize),
    Favorite(usize),
    Toggle,
    /// Percent of the track, 0-100
    Seek(f64),
    /// Percent volume, 0-100
    Volume(f32),
    Mute,
    Next,
    Previous,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <keyword>        search the selected sources
  sources <a,b|none>      select sources (qq, netease, kuwo)
  tab <name>              show search-results, playlist or favorites
  list                    print the visible list
  play <n>                play row n of the visible list
  add <n>                 add row n of the visible list to the playlist
  remove <n>              remove row n of the playlist
  fav <n>                 toggle favorite for row n of the visible list
  toggle                  play/pause
  seek <percent>          jump within the track
  vol <percent>           set volume
  mute                    mute/unmute
  next, prev              step through the playlist
  status                  show now playing
  quit                    leave";

impl Command {
    /// Parse a line; blank input yields `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => return Ok(None),
            "search" | "s" => {
                if rest.is_empty() {
                    return Err(usage("search <keyword>"));
                }
                Command::Search(rest.to_string())
            }
            "sources" => match rest {
                "" => return Err(usage("sources <a,b|none>")),
                "none" => Command::Sources(Vec::new()),
                list => Command::Sources(SourceId::parse_list(list)),
            },
            "tab" => Command::Tab(
                rest.parse()
                    .map_err(|_| usage("tab <search-results|playlist|favorites>"))?,
            ),
            "list" | "ls" => Command::List,
            "play" => Command::Play(row(rest, "play <n>")?),
            "add" => Command::Add(row(rest, "add <n>")?),
            "remove" | "rm" => Command::Remove(row(rest, "remove <n>")?),
            "fav" | "favorite" => Command::Favorite(row(rest, "fav <n>")?),
            "toggle" | "p" => Command::Toggle,
            "seek" => Command::Seek(
                rest.parse()
                    .map_err(|_| usage("seek <percent>"))?,
            ),
            "vol" | "volume" => Command::Volume(
                rest.parse()
                    .map_err(|_| usage("vol <percent>"))?,
            ),
            "mute" => Command::Mute,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(AppError::Command(format!(
                    "Unknown command '{other}', try 'help'"
                )))
            }
        };

        Ok(Some(command))
    }
}

fn row(arg: &str, form: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(usage(form)),
    }
}

fn usage(form: &str) -> AppError {
    AppError::Command(format!("Usage: {form}"))
}
