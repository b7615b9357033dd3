use std::path::Path;

use crate::canonical::screen_ids::{ScreenCatalog, UNKNOWN_SCREEN, build_screen_catalog};
use crate::error::Result;
use crate::trace::diagnostics::Diagnostics;
use crate::trace::document::TraceDocument;

/// `S<n>: <name>` per screen, ascending, one per line.
///
/// Screens never declared in States are listed as `Unknown Screen`.
pub fn list_screens_with_names(path: impl AsRef<Path>) -> Result<String> {
    let doc = TraceDocument::load(path)?;
    let catalog = build_screen_catalog(&doc, &mut Diagnostics::new());
    Ok(format_screen_listing(&catalog, UNKNOWN_SCREEN))
}

/// Render the listing with a custom label for unnamed screens.
pub fn format_screen_listing(catalog: &ScreenCatalog, unknown_label: &str) -> String {
    catalog
        .entries()
        .map(|(canonical, _, name)| format!("{}: {}", canonical, name.unwrap_or(unknown_label)))
        .collect::<Vec<_>>()
        .join("\n")
}
