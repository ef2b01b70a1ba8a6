use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::auth::password::hash_password;
use crate::auth::repo_types::{ApprovalStatus, Role, User};
use crate::config::AdminConfig;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Makes sure an admin account exists, creating one from the configured
/// credentials when none does. Idempotent: a later run finds the existing
/// admin and leaves it alone, so restarting never duplicates the account
/// or resets a password the operator has since changed.
pub async fn ensure_admin(db: &SqlitePool, cfg: &AdminConfig) -> anyhow::Result<()> {
    if let Some(admin) = User::find_any_admin(db).await? {
        debug!(username = %admin.username, "admin account already present");
        return Ok(());
    }

    let hash = hash_password(&cfg.password)?;
    let email = cfg.email.trim().to_lowercase();
    let admin = User::create(
        db,
        cfg.username.trim(),
        &email,
        &hash,
        Role::Admin,
        ApprovalStatus::Approved,
    )
    .await?;
    warn!(
        username = %admin.username,
        email = %admin.email,
        "created default admin account; change its password"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plausible_addresses_pass() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn junk_addresses_fail() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing-tld@example"));
    }
}
