//! Rendering of exported playlists into email subject and body.

use openmusic_db::models::song::SongSummary;
use serde::Serialize;

/// The playlist shape embedded in the export email.
#[derive(Debug, Serialize)]
pub struct ExportedPlaylist {
    pub id: String,
    pub name: String,
    pub songs: Vec<SongSummary>,
}

/// Top-level export document, kept under a `playlist` key so recipients
/// can feed the body straight back into an import.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub playlist: ExportedPlaylist,
}

/// Subject line for an export email.
pub fn subject(playlist_name: &str) -> String {
    format!("Export Playlist: {playlist_name}")
}

/// Render the export document as an HTML body: the pretty-printed JSON
/// wrapped in a `<pre>` block.
pub fn render_html(document: &ExportDocument) -> String {
    let json = serde_json::to_string_pretty(document).unwrap_or_default();
    format!("<pre>{json}</pre>")
}
