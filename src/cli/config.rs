use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::SavedCookie;
use crate::models::User;

const SESSION_FILE: &str = "session.json";

/// What the CLI remembers between invocations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliSession {
    /// Every cookie the API has set, with the URL that set it
    #[serde(default)]
    pub cookies: Vec<SavedCookie>,
    pub user: Option<User>,
    pub admin: Option<User>,
    pub saved_at: Option<DateTime<Utc>>,
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("COLLAB_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("collab").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<CliSession> {
    load_session_from(&get_config_dir()?)
}

pub fn save_session(session: &CliSession) -> anyhow::Result<()> {
    save_session_to(&get_config_dir()?, session)
}

pub fn load_session_from(dir: &Path) -> anyhow::Result<CliSession> {
    let session_file = dir.join(SESSION_FILE);

    if !session_file.exists() {
        return Ok(CliSession::default());
    }

    let content = fs::read_to_string(session_file)?;
    let session: CliSession = serde_json::from_str(&content)?;
    Ok(session)
}

pub fn save_session_to(dir: &Path, session: &CliSession) -> anyhow::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let content = serde_json::to_string_pretty(session)?;
    fs::write(dir.join(SESSION_FILE), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        std::env::temp_dir().join(format!("collab-cli-{}-{}-{}", name, std::process::id(), nanos))
    }

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id),
            name: id.to_string(),
            email: format!("{}@example.com", id),
            image: None,
        }
    }

    #[test]
    fn missing_file_is_an_empty_session() {
        let dir = scratch_dir("empty");
        assert_eq!(load_session_from(&dir).unwrap(), CliSession::default());
    }

    #[test]
    fn session_round_trips_through_config_dir() {
        let dir = scratch_dir("env");
        std::env::set_var("COLLAB_CLI_CONFIG_DIR", &dir);

        let session = CliSession {
            cookies: vec![SavedCookie {
                set_cookie: "refreshToken=r1; Path=/api/auth/refresh; HttpOnly".to_string(),
                url: "http://localhost:5000/api/auth/login".to_string(),
            }],
            user: Some(user("u1")),
            admin: Some(user("root")),
            saved_at: Some(Utc::now()),
        };
        save_session(&session).unwrap();

        assert_eq!(get_config_dir().unwrap(), dir);
        assert!(dir.join(SESSION_FILE).exists());
        assert_eq!(load_session().unwrap(), session);

        std::env::remove_var("COLLAB_CLI_CONFIG_DIR");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn older_session_files_without_cookies_still_load() {
        let dir = scratch_dir("legacy");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SESSION_FILE), r#"{"user": null, "admin": null, "saved_at": null}"#).unwrap();

        let session = load_session_from(&dir).unwrap();
        assert!(session.cookies.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }
}
