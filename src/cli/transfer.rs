use std::path::PathBuf;

use crate::{
    cli, error, info,
    management::{PlaylistLibrary, export_document, import_document},
    spotify::WebCatalog,
    success,
    types::PlaylistDocument,
    warning,
};

/// Exports the current selection (or the whole collection) to a JSON
/// document. No remote calls.
pub async fn export(output: PathBuf) {
    let library = PlaylistLibrary::load().await;
    let document = export_document(&library);

    if document.playlists.is_empty() {
        info!("Nothing to export.");
        return;
    }

    let json = match serde_json::to_string_pretty(&document) {
        Ok(json) => json,
        Err(e) => error!("Failed to serialize playlist document: {}", e),
    };
    if let Err(e) = async_fs::write(&output, json).await {
        error!("Failed to write {}: {}", output.display(), e);
    }

    success!(
        "Exported {} playlists to {}.",
        document.playlists.len(),
        output.display()
    );
}

/// Imports a playlist document, recreating each record remotely in order.
/// Playlists imported before a failure remain; import is not transactional.
pub async fn import(file: PathBuf) {
    let content = match async_fs::read_to_string(&file).await {
        Ok(content) => content,
        Err(e) => error!("Failed to read {}: {}", file.display(), e),
    };
    let document: PlaylistDocument = match serde_json::from_str(&content) {
        Ok(document) => document,
        Err(e) => error!("Invalid playlist document: {}", e),
    };

    let token = cli::valid_token().await;
    let api = WebCatalog;
    let mut library = PlaylistLibrary::load().await;

    let result = import_document(&api, &token, &mut library, document).await;

    // Records imported before a failure stay in the collection.
    if let Err(e) = library.persist().await {
        warning!("Failed to cache playlist library: {}", e);
    }

    match result {
        Ok(count) => success!("Imported {} playlists.", count),
        Err(e) => cli::report_failure("Import aborted", &e),
    }
}
