use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use songdupe::config::Config;
use songdupe::scanner::DEFAULT_EXTENSIONS;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_defaults_without_env() {
    // Use figment directly without Env to avoid interference from other tests
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();

    assert_eq!(config.extensions, DEFAULT_EXTENSIONS);
    assert_eq!(config.chunk_size, 8192);
    assert_eq!(config.threads, 0);
}

#[test]
fn test_config_env_layer() {
    std::env::set_var("SDTEST_THREADS", "16");
    std::env::set_var("SDTEST_ROOT", "/Volumes/MUSIC");

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("SDTEST_").split("__"))
        .extract()
        .unwrap();

    std::env::remove_var("SDTEST_THREADS");
    std::env::remove_var("SDTEST_ROOT");

    assert_eq!(config.threads, 16);
    assert_eq!(config.root, Some(PathBuf::from("/Volumes/MUSIC")));
}

#[test]
fn test_config_toml_layer_keeps_unset_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "follow_symlinks = true\n").unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert!(config.follow_symlinks);
    assert_eq!(config.chunk_size, 8192);
    assert_eq!(config.extensions.len(), DEFAULT_EXTENSIONS.len());
}

#[test]
fn test_config_show_output_is_loadable() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let original = Config {
        root: Some(temp_dir.path().to_path_buf()),
        extensions: vec![".flac".to_string()],
        threads: 2,
        chunk_size: 4096,
        follow_symlinks: false,
    };
    fs::write(&config_path, original.to_toml().unwrap()).unwrap();

    let loaded: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert_eq!(loaded, original);
}
