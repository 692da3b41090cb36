use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the JSON documents live unless `--data-dir` says otherwise
    pub fn data_dir() -> PathBuf {
        ProjectDirs::from("", "", "fitpro")
            .map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Directory for the log file
    pub fn state_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("fitpro")
        } else {
            ProjectDirs::from("", "", "fitpro")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir().join("fitpro.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_named_after_the_app() {
        let path = AppDirs::log_path();
        assert_eq!(path.file_name().unwrap(), "fitpro.log");
        assert!(path.starts_with(AppDirs::state_dir()));
    }
}
