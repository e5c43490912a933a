use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Serotrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("warn,{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Serotrack/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Serotrack")
}

/// Durable slot for the lab history (JSON array of panels).
pub fn labs_path() -> PathBuf {
    app_data_dir().join("labs.json")
}

/// Durable slot for the symptom journal (JSON array of entries).
pub fn journal_path() -> PathBuf {
    app_data_dir().join("symptoms.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Serotrack"));
    }

    #[test]
    fn slots_under_app_data() {
        assert!(labs_path().starts_with(app_data_dir()));
        assert!(labs_path().ends_with("labs.json"));
        assert!(journal_path().ends_with("symptoms.json"));
    }

    #[test]
    fn app_name_is_serotrack() {
        assert_eq!(APP_NAME, "Serotrack");
    }

    #[test]
    fn log_filter_names_crate() {
        assert!(default_log_filter().contains("serotrack=info"));
    }
}
