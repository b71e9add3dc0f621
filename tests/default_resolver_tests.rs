//! Tests for the process-level `get` / `get_or` / `clear_cache` functions.
//!
//! The default resolver is rooted at the working directory, so these tests
//! change the cwd and must run serialized.

use config_cascade::ConfigValue;
use serde_json::json;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_default_resolver_reads_working_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("config")).unwrap();
    fs::write(temp.path().join(".env"), "DEFAULT_IT_PORT=8080\n").unwrap();
    fs::write(
        temp.path().join("config/default.json"),
        r#"{"defaultIt": {"name": "svc"}}"#,
    )
    .unwrap();
    let _cwd = CwdGuard::new(&temp);

    temp_env::with_vars_unset(["DEFAULT_IT_PORT", "DEFAULT_IT_NAME", "APP_ENV"], || {
        config_cascade::clear_cache();
        assert_eq!(
            config_cascade::get("defaultIt.port").unwrap(),
            Some(ConfigValue::Number(8080.0))
        );
        assert_eq!(
            config_cascade::get("defaultIt.name").unwrap(),
            Some(ConfigValue::Document(json!("svc")))
        );
        assert_eq!(
            config_cascade::get_or("defaultIt.missing", true).unwrap(),
            ConfigValue::Bool(true)
        );
        assert_eq!(config_cascade::get("defaultIt.missing").unwrap(), None);
    });
    config_cascade::clear_cache();
}

#[test]
#[serial]
fn test_clear_cache_rereads_files() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("config")).unwrap();
    let config_file = temp.path().join("config/default.json");
    fs::write(&config_file, r#"{"defaultIt": {"rev": "a"}}"#).unwrap();
    let _cwd = CwdGuard::new(&temp);

    temp_env::with_vars_unset(["DEFAULT_IT_REV", "APP_ENV"], || {
        config_cascade::clear_cache();
        assert_eq!(
            config_cascade::get("defaultIt.rev").unwrap(),
            Some(ConfigValue::Document(json!("a")))
        );

        fs::write(&config_file, r#"{"defaultIt": {"rev": "b"}}"#).unwrap();
        assert_eq!(
            config_cascade::get("defaultIt.rev").unwrap(),
            Some(ConfigValue::Document(json!("a")))
        );

        config_cascade::clear_cache();
        assert_eq!(
            config_cascade::get("defaultIt.rev").unwrap(),
            Some(ConfigValue::Document(json!("b")))
        );
    });
    config_cascade::clear_cache();
}

#[test]
#[serial]
fn test_clear_cache_only_affects_calling_thread() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("config")).unwrap();
    let config_file = temp.path().join("config/default.json");
    fs::write(&config_file, r#"{"defaultIt": {"rev": "a"}}"#).unwrap();
    let _cwd = CwdGuard::new(&temp);

    temp_env::with_vars_unset(["DEFAULT_IT_REV", "APP_ENV"], || {
        config_cascade::clear_cache();
        assert_eq!(
            config_cascade::get("defaultIt.rev").unwrap(),
            Some(ConfigValue::Document(json!("a")))
        );

        fs::write(&config_file, r#"{"defaultIt": {"rev": "b"}}"#).unwrap();
        std::thread::spawn(config_cascade::clear_cache).join().unwrap();

        // This thread's resolver still holds the old document
        assert_eq!(
            config_cascade::get("defaultIt.rev").unwrap(),
            Some(ConfigValue::Document(json!("a")))
        );
    });
    config_cascade::clear_cache();
}
