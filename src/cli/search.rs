use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli, info,
    management::aggregate_search,
    spotify::WebCatalog,
    types::SearchTableRow,
    utils::SearchKinds,
    warning,
};

pub async fn search(query: String, kinds: SearchKinds) {
    let token = cli::valid_token().await;
    let api = WebCatalog;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching catalog...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let results = aggregate_search(&api, &token, &query, &kinds).await;
    pb.finish_and_clear();

    match results {
        Ok(results) => {
            for warn in &results.warnings {
                warning!("{}", warn);
            }

            let mut rows: Vec<SearchTableRow> = Vec::new();
            rows.extend(results.tracks.into_iter().map(|t| SearchTableRow {
                kind: "track".to_string(),
                name: t.name,
                artists: t.artists.join(", "),
                id: t.uri,
            }));
            rows.extend(results.albums.into_iter().map(|a| SearchTableRow {
                kind: "album".to_string(),
                name: a.name,
                artists: a.artists.join(", "),
                id: a.id,
            }));
            rows.extend(results.artists.into_iter().map(|a| SearchTableRow {
                kind: "artist".to_string(),
                name: a.name,
                artists: String::new(),
                id: a.id,
            }));

            if rows.is_empty() {
                info!("No results.");
            } else {
                let table = Table::new(rows);
                println!("{}", table);
            }
        }
        Err(e) => cli::report_failure("Search failed", &e),
    }
}
