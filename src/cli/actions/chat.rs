use crate::{
    cli::{
        actions::context::{AppContext, print_json},
        globals::OutputFormat,
    },
    client::AppError,
    features::chat::{
        client,
        types::{KnowledgeHit, KnowledgeQuery, KnowledgeQueryResponse},
    },
    util::Debouncer,
};
use anyhow::{Result, bail};
use std::time::Duration;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum Command {
    Ask {
        text: String,
        textbook: Option<String>,
    },
    Query(KnowledgeQuery),
    Explain {
        id: String,
    },
    History {
        limit: u32,
    },
    /// Reads queries from stdin; filters come from the template.
    Search {
        template: KnowledgeQuery,
        delay: Duration,
    },
}

type SearchResult = (String, Result<KnowledgeQueryResponse, AppError>);

/// Execute a chat command.
/// # Errors
/// Returns an error if not logged in, the input is blank, or the request fails.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    ctx.require_login()?;

    match command {
        Command::Ask { text, textbook } => {
            let text = non_blank(&text, "message")?;
            let reply = client::chat(&ctx.api, text, textbook.as_deref()).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&reply),
                OutputFormat::Text => {
                    println!("{}", reply.answer);
                    if !reply.suggested_topics.is_empty() {
                        println!();
                        println!("Suggested: {}", reply.suggested_topics.join(", "));
                    }
                    Ok(())
                }
            }
        }
        Command::Query(query) => {
            non_blank(&query.query, "query")?;
            let response = client::query_knowledge(&ctx.api, &query).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&response),
                OutputFormat::Text => {
                    for hit in &response.results {
                        println!("{}", hit_line(hit));
                    }
                    Ok(())
                }
            }
        }
        Command::Explain { id } => {
            let explanation = client::explain_knowledge(&ctx.api, &id).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&explanation),
                OutputFormat::Text => {
                    println!("{}", explanation.knowledge_point.content);
                    println!();
                    println!("{}", explanation.explanation);
                    Ok(())
                }
            }
        }
        Command::History { limit } => {
            let history = client::chat_history(&ctx.api, limit).await?;
            print_json(&history)
        }
        Command::Search { template, delay } => {
            let output = ctx.output;
            let api = ctx.api.clone();
            let lines = BufReader::new(tokio::io::stdin());
            let search = move |query: KnowledgeQuery| {
                let api = api.clone();
                async move { client::query_knowledge(&api, &query).await }
            };
            let report =
                |(query, result): SearchResult| print_search_result(output, &query, result);
            live_search(lines, Debouncer::new(delay), template, search, report).await
        }
    }
}

/// Debounced lookup over a stream of input lines. Each non-blank line
/// restarts the quiet period; only the last line in a burst is sent. Results
/// are handed to `report` in completion order, and input EOF waits for the
/// pending lookup.
async fn live_search<R, S, Fut, P>(
    input: R,
    debouncer: Debouncer,
    template: KnowledgeQuery,
    search: S,
    mut report: P,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Fn(KnowledgeQuery) -> Fut,
    Fut: std::future::Future<Output = Result<KnowledgeQueryResponse, AppError>> + Send + 'static,
    P: FnMut(SearchResult) -> Result<()>,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<SearchResult>();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                debug!(query = text, "search scheduled");
                let query = KnowledgeQuery {
                    query: text.to_string(),
                    ..template.clone()
                };
                let text = query.query.clone();
                let lookup = search(query);
                let tx = tx.clone();
                debouncer.call(async move {
                    let _ = tx.send((text, lookup.await));
                });
            }
            Some(result) = rx.recv() => report(result)?,
        }
    }

    // Only the pending lookup still holds a sender.
    drop(tx);
    while let Some(result) = rx.recv().await {
        report(result)?;
    }
    Ok(())
}

fn print_search_result(
    output: OutputFormat,
    query: &str,
    result: Result<KnowledgeQueryResponse, AppError>,
) -> Result<()> {
    match result {
        Ok(response) => match output {
            OutputFormat::Json => print_json(&response),
            OutputFormat::Text => {
                println!("# {query}");
                for hit in &response.results {
                    println!("{}", hit_line(hit));
                }
                Ok(())
            }
        },
        Err(err) => {
            warn!(query, error = %err, "search failed");
            Ok(())
        }
    }
}

fn non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("The {what} cannot be empty");
    }
    Ok(trimmed)
}

fn hit_line(hit: &KnowledgeHit) -> String {
    let mut line = format!("[{}] {}", hit.point_type, hit.content);
    if let Some(phonetic) = &hit.phonetic {
        line.push_str(&format!(" {phonetic}"));
    }
    if let Some(meaning) = &hit.chinese_meaning {
        line.push_str(&format!(" {meaning}"));
    }
    line
}
