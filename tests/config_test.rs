use std::{collections::HashMap, path::PathBuf};

use reddit_get::{
    config::{DEFAULT_USER_AGENT, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_USER_AGENT},
    error::Error,
    types::Credentials,
};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_with(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("redditgetrc");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_read_example_config() {
    let credentials = Credentials::from_file(&fixture("exampleconfig"))
        .await
        .unwrap();

    assert_eq!(
        credentials,
        Credentials {
            client_id: "testid".into(),
            client_secret: "testsecret".into(),
            user_agent: "testuseragent".into(),
            username: Some("testusername".into()),
            password: Some("testpassword".into()),
        }
    );
    assert!(credentials.has_user_auth());
}

#[tokio::test]
async fn test_read_config_without_user_auth() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[reddit-get]\nclient_id = \"id\"\nclient_secret = \"secret\"\nuser_agent = \"agent\"\n",
    );

    let credentials = Credentials::from_file(&path).await.unwrap();
    assert_eq!(credentials.client_id, "id");
    assert_eq!(credentials.username, None);
    assert!(!credentials.has_user_auth());
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nothere");

    let err = Credentials::from_file(&path).await.unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(ref p) if *p == path));
    assert!(err.to_string().contains("REDDIT_CLIENT_ID"));
}

#[tokio::test]
async fn test_invalid_toml() {
    let err = Credentials::from_file(&fixture("invalidtomlfile"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(err.to_string().starts_with("Invalid TOML syntax in config file"));
}

#[tokio::test]
async fn test_missing_section() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[other]\nclient_id = \"id\"\n");

    let err = Credentials::from_file(&path).await.unwrap_err();
    assert!(matches!(err, Error::MissingSection(_)));
    assert!(err.to_string().ends_with("missing [reddit-get] section"));
}

#[tokio::test]
async fn test_missing_required_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[reddit-get]\nclient_id = \"id\"\n");

    let err = Credentials::from_file(&path).await.unwrap_err();
    match err {
        Error::MissingKeys { keys, .. } => assert_eq!(keys, "client_secret, user_agent"),
        other => panic!("expected MissingKeys, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrongly_typed_key() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[reddit-get]\nclient_id = 1\nclient_secret = \"secret\"\nuser_agent = \"agent\"\n",
    );

    let err = Credentials::from_file(&path).await.unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[test]
fn test_credentials_from_env() {
    let lookup = env_with(&[
        (ENV_CLIENT_ID, "envid"),
        (ENV_CLIENT_SECRET, "envsecret"),
        (ENV_USER_AGENT, "envagent"),
    ]);

    let credentials = Credentials::from_env_with(lookup).unwrap();
    assert_eq!(credentials.client_id, "envid");
    assert_eq!(credentials.client_secret, "envsecret");
    assert_eq!(credentials.user_agent, "envagent");
    assert!(!credentials.has_user_auth());
}

#[test]
fn test_credentials_from_env_default_user_agent() {
    let lookup = env_with(&[(ENV_CLIENT_ID, "envid"), (ENV_CLIENT_SECRET, "envsecret")]);

    let credentials = Credentials::from_env_with(lookup).unwrap();
    assert_eq!(credentials.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn test_credentials_from_env_requires_id_and_secret() {
    assert!(Credentials::from_env_with(no_env).is_none());
    assert!(Credentials::from_env_with(env_with(&[(ENV_CLIENT_ID, "envid")])).is_none());
    assert!(
        Credentials::from_env_with(env_with(&[
            (ENV_CLIENT_ID, "envid"),
            (ENV_CLIENT_SECRET, ""),
        ]))
        .is_none()
    );
}

#[tokio::test]
async fn test_load_prefers_environment() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nothere");
    let lookup = env_with(&[(ENV_CLIENT_ID, "envid"), (ENV_CLIENT_SECRET, "envsecret")]);

    let (path, credentials) = Credentials::load_with(missing.to_str().unwrap(), lookup)
        .await
        .unwrap();
    assert_eq!(path, missing);
    assert_eq!(credentials.client_id, "envid");
}

#[tokio::test]
async fn test_load_falls_back_to_file() {
    let config = fixture("exampleconfig");

    let (path, credentials) = Credentials::load_with(config.to_str().unwrap(), no_env)
        .await
        .unwrap();
    assert_eq!(path, config);
    assert_eq!(credentials.client_id, "testid");
}

#[tokio::test]
async fn test_load_without_env_or_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nothere");

    let err = Credentials::load_with(missing.to_str().unwrap(), no_env)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}
