use std::env;

use crate::prelude::*;

/// Lowercase ASCII slug from a human title.
/// Runs of non-alphanumeric characters collapse into single dashes.
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut dash = false;

  for ch in text.chars() {
    if ch.is_ascii_alphanumeric() {
      slug.push(ch.to_ascii_lowercase());
      dash = false;
    } else if !dash && !slug.is_empty() {
      slug.push('-');
      dash = true;
    }
  }

  while slug.ends_with('-') {
    slug.pop();
  }

  slug
}

/// Rounded integer percentage of an amount in cents.
pub fn percent_of(amount: i64, percent: i64) -> i64 {
  (amount * percent + 50) / 100
}

/// Reads a `humantime` duration (e.g. `2h`, `30m`) from the environment.
pub fn env_duration(key: &str, default: Duration) -> Duration {
  env::var(key)
    .ok()
    .and_then(|raw| humantime::parse_duration(&raw).ok())
    .unwrap_or(default)
}

/// Non-empty trimmed form field or a 400 naming the missing field.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
  let value = value.trim();
  if value.is_empty() {
    return Err(Error::Validation(format!("missing field: {field}")));
  }
  Ok(value)
}
