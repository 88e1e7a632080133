use std::path::PathBuf;

use migration::{Migrator, MigratorTrait};
use tokio::fs;
use uuid::Uuid;

use crate::{entity::user, prelude::*, sv};

/// An authenticated client, addressed by its opaque bearer token.
#[derive(Debug, Clone)]
pub struct Session {
  pub user_id: i32,
  pub is_admin: bool,
  pub last_seen: DateTime,
}

pub type Sessions = DashMap<String, Session>;

#[derive(Debug, Clone)]
pub struct Config {
  pub session_lifetime: Duration,
  pub backup_interval: Duration,
  pub backup_dir: PathBuf,
  pub backup_keep: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      session_lifetime: Duration::from_secs(2 * 3600),
      backup_interval: Duration::from_secs(6 * 3600),
      backup_dir: PathBuf::from("./backups"),
      backup_keep: 8,
    }
  }
}

impl Config {
  pub fn from_env() -> Self {
    let defaults = Self::default();

    Self {
      session_lifetime: utils::env_duration(
        "SESSION_LIFETIME",
        defaults.session_lifetime,
      ),
      backup_interval: utils::env_duration(
        "BACKUP_INTERVAL",
        defaults.backup_interval,
      ),
      backup_dir: std::env::var("BACKUP_DIR")
        .map(PathBuf::from)
        .unwrap_or(defaults.backup_dir),
      backup_keep: std::env::var("BACKUP_KEEP")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(defaults.backup_keep),
    }
  }
}

pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub catalog: sv::Catalog<'a>,
  pub cart: sv::Cart<'a>,
  pub shipping: sv::Shipping<'a>,
  pub coupon: sv::Coupon<'a>,
  pub order: sv::Order<'a>,
  pub page: sv::Page<'a>,
  pub banner: sv::Banner<'a>,
  pub contact: sv::Contact<'a>,
  pub request: sv::Request<'a>,
  pub review: sv::Review<'a>,
  pub analytics: sv::Analytics<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub sessions: Sessions,
  /// `X-Admin-Key` header value granting CMS access; `None` disables
  /// header-based admin auth
  pub admin_key: Option<String>,
  pub config: Config,
}

impl AppState {
  pub async fn new(db_url: &str, admin_key: Option<String>) -> Self {
    Self::with_config(db_url, admin_key, Config::from_env()).await
  }

  pub async fn with_config(
    db_url: &str,
    admin_key: Option<String>,
    config: Config,
  ) -> Self {
    info!("Connecting to database...");
    let db =
      Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, sessions: DashMap::new(), admin_key, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      catalog: sv::Catalog::new(&self.db),
      cart: sv::Cart::new(&self.db),
      shipping: sv::Shipping::new(&self.db),
      coupon: sv::Coupon::new(&self.db),
      order: sv::Order::new(&self.db),
      page: sv::Page::new(&self.db),
      banner: sv::Banner::new(&self.db),
      contact: sv::Contact::new(&self.db),
      request: sv::Request::new(&self.db),
      review: sv::Review::new(&self.db),
      analytics: sv::Analytics::new(&self.db),
    }
  }

  /// Issues a fresh bearer token for a logged-in account.
  pub fn open_session(&self, user: &user::Model) -> String {
    let token = Uuid::new_v4().to_string();

    self.sessions.insert(
      token.clone(),
      Session {
        user_id: user.id,
        is_admin: user.is_admin,
        last_seen: Utc::now().naive_utc(),
      },
    );

    token
  }

  /// Resolves a bearer token, refreshing its idle timer.
  pub fn session(&self, token: &str) -> Option<Session> {
    let mut session = self.sessions.get_mut(token)?;
    session.last_seen = Utc::now().naive_utc();
    Some(session.clone())
  }

  pub fn drop_session(&self, token: &str) {
    self.sessions.remove(token);
  }

  pub fn gc_sessions(&self) {
    let now = Utc::now().naive_utc();
    let lifetime = self.config.session_lifetime.as_secs() as i64;

    self
      .sessions
      .retain(|_token, session| (now - session.last_seen).num_seconds() < lifetime);
  }

  /// Snapshots the SQLite database into the backup directory and
  /// prunes old snapshots past `backup_keep`.
  pub async fn perform_backup(&self) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(&self.config.backup_dir)
      .await
      .context("Failed to create backup directory")?;

    let timestamp = Utc::now().format("%Y-%m-%d_%H-%M-%S");
    let path = self.config.backup_dir.join(format!("backup_{}.db", timestamp));

    if fs::try_exists(&path).await.unwrap_or(false) {
      let _ = fs::remove_file(&path).await;
    }

    let query = format!("VACUUM INTO '{}'", path.display());
    self
      .db
      .execute(sea_orm::Statement::from_string(
        sea_orm::DatabaseBackend::Sqlite,
        query,
      ))
      .await?;

    self.prune_backups().await?;
    info!("Database backed up to {}", path.display());

    Ok(path)
  }

  async fn prune_backups(&self) -> anyhow::Result<()> {
    let mut snapshots = Vec::new();
    let mut entries = fs::read_dir(&self.config.backup_dir).await?;

    while let Some(entry) = entries.next_entry().await? {
      let name = entry.file_name();
      let name = name.to_string_lossy();
      if name.starts_with("backup_") && name.ends_with(".db") {
        snapshots.push(entry.path());
      }
    }

    // Timestamped names sort chronologically
    snapshots.sort();

    while snapshots.len() > self.config.backup_keep {
      let oldest = snapshots.remove(0);
      debug!("Pruning old backup {}", oldest.display());
      let _ = fs::remove_file(oldest).await;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  fn test_user(is_admin: bool) -> user::Model {
    user::Model {
      id: 7,
      email: "shopper@example.com".into(),
      password_hash: "x".into(),
      display_name: "Shopper".into(),
      is_admin,
      created_at: Utc::now().naive_utc(),
    }
  }

  #[tokio::test]
  async fn test_session_lifecycle() {
    let app =
      AppState::with_config("sqlite::memory:", None, Config::default()).await;

    let token = app.open_session(&test_user(true));
    let session = app.session(&token).expect("session should resolve");
    assert_eq!(session.user_id, 7);
    assert!(session.is_admin);

    app.drop_session(&token);
    assert!(app.session(&token).is_none());
  }

  #[tokio::test]
  async fn test_gc_reaps_idle_sessions() {
    let config = Config {
      session_lifetime: Duration::from_secs(0),
      ..Config::default()
    };
    let app = AppState::with_config("sqlite::memory:", None, config).await;

    let token = app.open_session(&test_user(false));
    app.gc_sessions();

    assert!(app.sessions.get(&token).is_none());
  }

  #[tokio::test]
  async fn test_backup_snapshot_lands_in_dir() {
    let dir = tempdir().unwrap();
    let config = Config {
      backup_dir: dir.path().to_path_buf(),
      ..Config::default()
    };
    let app = AppState::with_config("sqlite::memory:", None, config).await;

    let path = app.perform_backup().await.unwrap();
    assert!(path.exists());
    assert!(path.starts_with(dir.path()));
  }
}
