use std::env;
use std::path::PathBuf;

/// Days a clinic room can be scheduled on, unless CLINIC_DAYS overrides the
/// vocabulary. Day names are matched exactly, as produced by the wall clock.
pub const DEFAULT_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub fn default_days() -> Vec<String> {
    DEFAULT_DAYS.iter().map(|d| d.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub admin_password: String,
    pub data_dir: PathBuf,
    pub days: Vec<String>,
}

impl Config {
    /// Reads settings from the environment. The first CLI argument, when
    /// present and numeric, overrides the PORT variable.
    pub fn from_env() -> Self {
        let args: Vec<String> = env::args().collect();
        let port = args
            .get(1)
            .and_then(|p| p.parse::<u16>().ok())
            .or_else(|| env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()))
            .unwrap_or(3001);
        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let days = env::var("CLINIC_DAYS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|days| !days.is_empty())
            .unwrap_or_else(default_days);

        Config {
            port,
            admin_password,
            data_dir,
            days,
        }
    }
}
