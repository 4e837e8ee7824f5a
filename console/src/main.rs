use anyhow::{bail, Result};
use clap::Parser;
use docsearch::{paginate, remove_duplicates, DocumentStatus, RequestQueue, SearchConfig, SearchHit, SearchServer};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod load;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Rank documents against plus/minus queries read from stdin", long_about = None)]
struct Args {
    /// Documents file, one JSON object per line
    #[arg(long)]
    docs: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Only search documents with this status
    #[arg(long, default_value = "actual", value_parser = parse_status)]
    status: DocumentStatus,
    /// Maximum hits per query
    #[arg(long, default_value_t = docsearch::MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Hits printed per page
    #[arg(long, default_value_t = 2)]
    page_size: usize,
    /// Remove duplicate documents after loading
    #[arg(long, default_value_t = false)]
    dedup: bool,
    /// Print hits as JSON objects
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_status(s: &str) -> Result<DocumentStatus> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "actual" => DocumentStatus::Actual,
        "irrelevant" => DocumentStatus::Irrelevant,
        "banned" => DocumentStatus::Banned,
        "removed" => DocumentStatus::Removed,
        other => bail!("unknown status {other:?}"),
    })
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let config = SearchConfig::default().with_max_results(args.max_results);
    let mut server = SearchServer::from_stop_words_text(&args.stop_words)?.with_config(config);
    load::load_jsonl(&args.docs, &mut server)?;
    if args.dedup {
        let removed = remove_duplicates(&mut server);
        tracing::info!(removed = removed.len(), remaining = server.document_count(), "duplicates removed");
    }

    let mut queue = RequestQueue::new(&server);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        match queue.add_find_request_by_status(&line, args.status) {
            Ok(hits) => {
                for page in paginate(&hits, args.page_size)?.iter() {
                    for hit in page {
                        writeln!(out, "{}", render_hit(hit, args.json)?)?;
                    }
                    writeln!(out, "Page break")?;
                }
            }
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }
    writeln!(out, "Total empty requests: {}", queue.no_result_requests())?;
    Ok(())
}

fn render_hit(hit: &SearchHit, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(hit)?);
    }
    Ok(format!("{{ document_id = {}, relevance = {}, rating = {} }}", hit.doc_id, hit.relevance, hit.rating))
}
