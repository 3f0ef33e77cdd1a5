#[cfg(test)]
mod test {

    use serial_test::serial;

    use crate::config::settings::{Args, LogFormat, Settings};

    fn args() -> Args {
        Args {
            host: "127.0.0.1".to_string(),
            port: 9000,
            log_level: None,
            log_format: LogFormat::Compact,
        }
    }

    #[test]
    #[serial]
    fn load_reads_credentials_from_environment() {
        std::env::set_var("AUTH_TOKEN_USERNAME", "svc-user");
        std::env::set_var("AUTH_TOKEN_APIKEY", "svc-key");

        let settings = Settings::load(&args()).unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.credentials.username, "svc-user");
        assert_eq!(settings.credentials.api_key, "svc-key");

        std::env::remove_var("AUTH_TOKEN_USERNAME");
        std::env::remove_var("AUTH_TOKEN_APIKEY");
    }

    #[test]
    #[serial]
    fn missing_username_fails_with_named_variable() {
        std::env::remove_var("AUTH_TOKEN_USERNAME");
        std::env::set_var("AUTH_TOKEN_APIKEY", "svc-key");

        let err = Settings::load(&args()).unwrap_err();
        assert!(err.to_string().contains("AUTH_TOKEN_USERNAME"));

        std::env::remove_var("AUTH_TOKEN_APIKEY");
    }

    #[test]
    #[serial]
    fn missing_api_key_fails_with_named_variable() {
        std::env::set_var("AUTH_TOKEN_USERNAME", "svc-user");
        std::env::remove_var("AUTH_TOKEN_APIKEY");

        let err = Settings::load(&args()).unwrap_err();
        assert!(err.to_string().contains("AUTH_TOKEN_APIKEY"));

        std::env::remove_var("AUTH_TOKEN_USERNAME");
    }
}
