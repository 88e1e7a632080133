pub mod cron;
pub mod server;

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::state::AppState;

const RESTART_DELAY: Duration = Duration::from_secs(5);

/// A long-running piece of the application, supervised and restarted
/// when it stops or crashes.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()>;
}

pub struct Host {
  plugins: Vec<Arc<dyn Plugin>>,
}

impl Host {
  pub fn new() -> Self {
    Self { plugins: Vec::new() }
  }

  pub fn register<P: Plugin + 'static>(mut self, plugin: P) -> Self {
    self.plugins.push(Arc::new(plugin));
    self
  }

  /// Spawns every registered plugin on its own supervision loop.
  pub async fn run(self, app: Arc<AppState>) {
    for plugin in self.plugins {
      let app = app.clone();

      tokio::spawn(async move {
        let name = plugin.name();
        info!("Plugin `{name}` starting");

        loop {
          let app = app.clone();
          let plugin = plugin.clone();

          let handle = tokio::spawn(async move { plugin.start(app).await });

          match handle.await {
            Ok(Ok(())) => {
              warn!("Plugin `{name}` exited cleanly, restarting");
            }
            Ok(Err(err)) => {
              error!("Plugin `{name}` failed: {err:#}");
            }
            Err(join_err) if join_err.is_cancelled() => {
              info!("Plugin `{name}` shut down");
              break;
            }
            Err(_) => {
              error!("Plugin `{name}` panicked");
            }
          }

          sleep(RESTART_DELAY).await;
        }
      });
    }
  }
}
