use anyhow::Result;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::client::{ClientError, ProxyClient};
use crate::clipboard::Clipboard;
use crate::data_models::SearchResult;
use crate::view::{COPY_PULSE, SearchView, Ticket, render::render};

/// What the terminal session reacts to besides user input.
enum Event {
    Resolved(Ticket, Result<SearchResult, ClientError>),
    Redraw,
}

/// A parsed line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Copy(usize),
    Quit,
    Search(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        match trimmed {
            "n" | ":next" => return Command::Next,
            "p" | ":prev" => return Command::Previous,
            "q" | ":quit" => return Command::Quit,
            _ => {}
        }
        if let Some(rest) = trimmed.strip_prefix("c ") {
            if let Ok(row) = rest.trim().parse::<usize>() {
                return Command::Copy(row);
            }
        }
        Command::Search(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Drives a [`SearchView`] from stdin. Searches run as spawned tasks, so a
/// new search can be submitted while another is in flight.
pub async fn run(
    client: ProxyClient,
    mut clipboard: Box<dyn Clipboard + Send>,
    initial_query: Option<String>,
) -> Result<()> {
    let mut view = SearchView::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    if let Some(query) = initial_query {
        submit(&mut view, &client, &tx, query);
    }
    draw(&mut stdout, &view).await?;

    loop {
        tokio::select! {
            line = stdin.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Next => { view.next_page(); }
                    Command::Previous => { view.previous_page(); }
                    Command::Copy(row) => {
                        let copied = row
                            .checked_sub(1)
                            .and_then(|index| view.copy_row(index, clipboard.as_mut(), Instant::now()))
                            .is_some();
                        if copied {
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                tokio::time::sleep(COPY_PULSE).await;
                                let _ = tx.send(Event::Redraw);
                            });
                        }
                    }
                    Command::Search(query) => submit(&mut view, &client, &tx, query),
                }
            }
            Some(event) = rx.recv() => {
                if let Event::Resolved(ticket, outcome) = event {
                    view.resolve(ticket, outcome);
                }
            }
        }
        draw(&mut stdout, &view).await?;
    }

    Ok(())
}

fn submit(
    view: &mut SearchView,
    client: &ProxyClient,
    tx: &mpsc::UnboundedSender<Event>,
    query: String,
) {
    view.set_query(query);
    let Some(ticket) = view.submit() else {
        return;
    };

    let client = client.clone();
    let query = view.query().to_string();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.search(&query).await;
        let _ = tx.send(Event::Resolved(ticket, outcome));
    });
}

async fn draw(stdout: &mut tokio::io::Stdout, view: &SearchView) -> Result<()> {
    let mut frame = render(view, Instant::now());
    frame.push_str("\n[text] search  [n] next  [p] previous  [c N] copy row  [q] quit\n");
    stdout.write_all(frame.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
