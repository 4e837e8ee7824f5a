use anyhow::{Context, Result};
use docsearch::{DocId, DocumentStatus, Rating, SearchServer};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

/// Add every document of a JSON Lines file to the server. Returns the number added.
pub fn load_jsonl(file: &Path, server: &mut SearchServer) -> Result<usize> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut added = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", file.display(), lineno + 1))?;
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("{}:{}: document {} rejected", file.display(), lineno + 1, doc.id))?;
        added += 1;
    }
    tracing::info!(added, file = %file.display(), "documents loaded");
    Ok(added)
}
