//! Integration tests for the command-line surface.

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    /// The top-level help output documents all supported flags.
    #[test]
    fn test_help_lists_supported_flags() {
        let mut cmd = Command::cargo_bin("vmexport").unwrap();
        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("--config"))
            .stdout(predicate::str::contains("--output-dir"))
            .stdout(predicate::str::contains("--client-id"));
    }

    #[test]
    fn test_version_flag() {
        let mut cmd = Command::cargo_bin("vmexport").unwrap();
        cmd.arg("--version");

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("vmexport"));
    }

    /// A missing configuration file is a configuration error, reported on
    /// stderr with the config exit code.
    #[test]
    fn test_missing_configuration_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = Command::cargo_bin("vmexport").unwrap();
        cmd.env("VMEXPORT_CONFIG_DIR", dir.path());

        cmd.assert()
            .failure()
            .code(78)
            .stderr(predicate::str::contains("Configuration error"));
    }

    /// An invalid client id value is rejected by the argument parser.
    #[test]
    fn test_non_numeric_client_id_is_rejected() {
        let mut cmd = Command::cargo_bin("vmexport").unwrap();
        cmd.arg("--client-id").arg("not-a-number");

        cmd.assert().failure().stderr(predicate::str::contains("invalid value"));
    }
}
