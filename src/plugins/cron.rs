//! Maintenance cron: session GC and periodic database backups

use std::sync::Arc;

use async_trait::async_trait;

use crate::{prelude::*, state::AppState};

const GC_INTERVAL: Duration = Duration::from_secs(60);

pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    let mut gc = time::interval(GC_INTERVAL);
    let mut backup = time::interval(app.config.backup_interval);

    // The first tick of both intervals fires immediately; an initial
    // backup right after boot is fine, an initial GC is a no-op.
    loop {
      tokio::select! {
        _ = gc.tick() => {
          app.gc_sessions();
        }
        _ = backup.tick() => {
          if let Err(err) = app.perform_backup().await {
            error!("Scheduled backup failed: {err:#}");
          }
        }
      }
    }
  }
}
