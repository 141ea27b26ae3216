use std::env;
use std::fs;
use tempfile::tempdir;

#[cfg(test)]
mod config_tests {
    use super::*;
    use gatop::config::{Config, DEFAULT_API_ENDPOINT};

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.logging.level, "ERROR");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.output, "console");

        assert_eq!(config.reporting.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.reporting.timeout_secs, 30);

        assert!(config.paths.settings_file.ends_with("gatop/settings.toml"));
    }

    #[test]
    fn test_env_variable_override() {
        env::set_var("GATOP_TIMEOUT_SECS", "5");
        env::set_var("GATOP_ABSPATH", "/var/www/html");
        env::set_var("GATOP_API_ENDPOINT", "http://localhost:8080/v4/reports:batchGet");

        let mut config = Config::default();
        config
            .apply_env_overrides()
            .expect("Failed to apply env overrides");

        assert_eq!(config.reporting.timeout_secs, 5);
        assert!(config.paths.base_path.starts_with("/var/www/html"));
        assert_ne!(config.paths.base_path, "/var/www/html");
        assert_eq!(
            config.reporting.api_endpoint,
            "http://localhost:8080/v4/reports:batchGet"
        );

        env::remove_var("GATOP_TIMEOUT_SECS");
        env::remove_var("GATOP_ABSPATH");
        env::remove_var("GATOP_API_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.reporting.timeout_secs = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.reporting.api_endpoint = "analyticsreporting.googleapis.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_loading() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("gatop.toml");

        let test_config = r#"
[logging]
level = "DEBUG"
format = "json"
output = "file"

[paths]
base_path = "/srv/wordpress/"
settings_file = "/etc/gatop/settings.toml"
log_directory = "/var/log/gatop"

[reporting]
api_endpoint = "https://analyticsreporting.googleapis.com/v4/reports:batchGet"
timeout_secs = 10
"#;
        fs::write(&config_path, test_config).expect("Failed to write test config");

        let config = Config::load_from_file(&config_path).expect("Failed to load config");

        assert_eq!(config.logging.level, "DEBUG");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.paths.base_path, "/srv/wordpress/");
        assert_eq!(
            config.paths.settings_file,
            std::path::PathBuf::from("/etc/gatop/settings.toml")
        );
        assert_eq!(config.reporting.timeout_secs, 10);
    }

    #[test]
    fn test_config_file_missing_section_fails() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("gatop.toml");
        fs::write(&config_path, "[logging]\nlevel = \"INFO\"\n").unwrap();

        assert!(Config::load_from_file(&config_path).is_err());
    }

    #[test]
    fn test_file_loading_does_not_record_source() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("gatop.toml");
        fs::write(
            &config_path,
            "[logging]\nlevel = \"INFO\"\nformat = \"pretty\"\noutput = \"console\"\n\n\
             [paths]\nbase_path = \"/srv/\"\nsettings_file = \"s.toml\"\nlog_directory = \"logs\"\n\n\
             [reporting]\napi_endpoint = \"http://localhost/\"\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = Config::load_from_file(&config_path).expect("Failed to load config");
        assert!(config.source.is_none());
        assert!(Config::default().source.is_none());
    }
}
