//! Integration tests for TOML and environment layering.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::Jail;
use pretty_assertions::assert_eq;
use qa_config::QaConfig;

#[test]
fn project_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".qa")?;
        jail.create_file(
            ".qa/config.toml",
            r#"
[database]
path = "forum.db"
foreign_keys = false
"#,
        )?;

        let config = QaConfig::load().expect("config loads");
        assert_eq!(config.database.path, "forum.db");
        assert!(!config.database.foreign_keys);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".qa")?;
        jail.create_file(".qa/config.toml", "[database]\npath = \"forum.db\"\n")?;
        jail.set_env("QA_DATABASE__PATH", "from_env.db");

        let config = QaConfig::load().expect("config loads");
        assert_eq!(config.database.path, "from_env.db");
        assert!(config.database.foreign_keys);
        Ok(())
    });
}

#[test]
fn empty_path_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.set_env("QA_DATABASE__PATH", "");
        assert!(QaConfig::load().is_err());
        Ok(())
    });
}
