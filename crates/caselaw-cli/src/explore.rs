//! Interactive search session driving one `SearchController`.

use std::io::Write;

use anyhow::Context;
use caselaw_client::CaseApi;
use caselaw_controller::{CaseState, SearchController, load_case};
use caselaw_core::{Topic, parse_year};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display::{CaseView, FilterLine, SearchView, TopicList};

const HELP: &str = "\
Commands:
  q <text>            set query text
  topic <id|none>     filter by topic
  from <year|none>    earliest year
  to <year|none>      latest year
  clear               reset topic and years
  search              run the search (page 1)
  next | prev         change page
  refresh             reload the current page
  retry               rerun a failed search
  open <id>           show a case and similar cases
  topics              list topics
  show                show filters and results
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Topic(Option<i64>),
    YearFrom(Option<i32>),
    YearTo(Option<i32>),
    Clear,
    Search,
    Next,
    Prev,
    Refresh,
    Retry,
    Open(String),
    Topics,
    Show,
    Help,
    Quit,
    Nothing,
}

/// Parse one input line. Errors are messages for the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let cmd = match word.to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "q" | "query" => Command::Query(rest.to_string()),
        "topic" => Command::Topic(parse_optional(rest, |s| {
            s.parse::<i64>().map_err(|_| format!("not a topic id: {s:?}"))
        })?),
        "from" => Command::YearFrom(parse_optional(rest, year)?),
        "to" => Command::YearTo(parse_optional(rest, year)?),
        "clear" => Command::Clear,
        "search" | "s" => Command::Search,
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "refresh" => Command::Refresh,
        "retry" => Command::Retry,
        "open" if !rest.is_empty() => Command::Open(rest.to_string()),
        "open" => return Err("usage: open <id>".into()),
        "topics" => Command::Topics,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(cmd)
}

fn parse_optional<T>(
    raw: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, String> {
    match raw {
        "" | "none" | "any" | "all" => Ok(None),
        s => parse(s).map(Some),
    }
}

fn year(s: &str) -> Result<i32, String> {
    match parse_year(s) {
        Ok(Some(y)) => Ok(y),
        Ok(None) => Err("missing year".into()),
        Err(e) => Err(e.to_string()),
    }
}

struct Session<A> {
    controller: SearchController<A>,
    topics: Vec<Topic>,
}

impl<A: CaseApi> Session<A> {
    fn search_view(&self) -> String {
        SearchView {
            state: self.controller.state(),
            has_more: self.controller.has_more(),
        }
        .to_string()
    }

    fn filter_line(&self) -> String {
        FilterLine {
            filters: self.controller.filters(),
            topics: &self.topics,
        }
        .to_string()
    }

    /// The topic vocabulary is fetched on first use and kept for the session.
    async fn ensure_topics(&mut self) -> Result<(), String> {
        if self.topics.is_empty() {
            self.topics = self
                .controller
                .api()
                .get_topics()
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    async fn execute(&mut self, cmd: Command) -> String {
        match cmd {
            Command::Query(text) => {
                self.controller.set_query(text);
                self.filter_line()
            }
            Command::Topic(topic) => {
                self.controller.set_topic(topic);
                if topic.is_some()
                    && let Err(msg) = self.ensure_topics().await
                {
                    tracing::warn!(error = %msg, "topic names unavailable");
                }
                self.filter_line()
            }
            Command::YearFrom(y) => {
                self.controller.set_year_from(y);
                self.filter_line()
            }
            Command::YearTo(y) => {
                self.controller.set_year_to(y);
                self.filter_line()
            }
            Command::Clear => {
                self.controller.clear_filters();
                self.filter_line()
            }
            Command::Search => {
                self.controller.search(0).await;
                self.search_view()
            }
            Command::Next => {
                if self.controller.next_page().await {
                    self.search_view()
                } else {
                    "No further pages.".into()
                }
            }
            Command::Prev => {
                if self.controller.prev_page().await {
                    self.search_view()
                } else {
                    "Already on the first page.".into()
                }
            }
            Command::Refresh => {
                if self.controller.refresh().await {
                    self.search_view()
                } else {
                    "Nothing to refresh; run `search` first.".into()
                }
            }
            Command::Retry => {
                if self.controller.retry().await {
                    self.search_view()
                } else {
                    "Nothing to retry.".into()
                }
            }
            Command::Open(raw) => {
                let state = CaseState::from(load_case(self.controller.api(), &raw).await);
                CaseView(&state).to_string()
            }
            Command::Topics => match self.ensure_topics().await {
                Ok(()) => TopicList(&self.topics).to_string(),
                Err(msg) => msg,
            },
            Command::Show => format!("{}\n\n{}", self.filter_line(), self.search_view()),
            Command::Help => HELP.into(),
            Command::Quit | Command::Nothing => String::new(),
        }
    }
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<A: CaseApi>(api: A) -> anyhow::Result<()> {
    let mut session = Session {
        controller: SearchController::new(api),
        topics: Vec::new(),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    loop {
        print!("caselaw> ");
        std::io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Ok(cmd) => {
                let out = session.execute(cmd).await;
                println!("{}", out.trim_end());
            }
            Err(msg) => println!("{msg}"),
        }
    }
    Ok(())
}
