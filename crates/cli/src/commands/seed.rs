//! Seed the product catalog and the sample notification feed.

use tracing::info;

use walmartchain_storefront::{AppState, seed};

use crate::catalog;

use super::CommandResult;

/// Write the demo catalog and replace the notification feed with samples.
///
/// An existing catalog is left alone unless `force` is set; the notification
/// feed is always replaced.
pub fn run(state: &AppState, force: bool) -> CommandResult {
    let data_dir = &state.config().data_dir;

    let catalog_path = data_dir.join(catalog::CATALOG_FILE);
    if catalog_path.exists() && !force {
        info!(path = %catalog_path.display(), "catalog already exists, use --force to overwrite");
    } else {
        let path = catalog::write_default(data_dir)?;
        info!(path = %path.display(), products = catalog::default_products().len(), "catalog written");
    }

    let samples = seed::sample_notifications();
    let count = samples.len();
    state.notifications().replace_feed(samples);
    info!(notifications = count, "sample notification feed seeded");

    Ok(())
}
