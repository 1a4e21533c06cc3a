//! Serialization format of the three on-disk documents

use pretty_assertions::assert_eq;
use skill_fs::ConfigStore;
use skill_meta::{Error, IndexFile, SkillEntry, SkillMeta, Source, SourcesFile};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_sources_full() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sources.skill.json");
    fs::write(
        &path,
        r#"{
  "$schema": "./schemas/sources.schema.json",
  "sources": [
    { "repo": "https://github.com/acme/skills" },
    { "repo": "https://github.com/acme/tools.git", "branch": "stable", "exclude": ["docs", "examples"] }
  ]
}"#,
    )
    .unwrap();

    let sources = SourcesFile::load(&path).unwrap();

    assert_eq!(sources.schema.as_deref(), Some("./schemas/sources.schema.json"));
    assert_eq!(
        sources.sources,
        vec![
            Source::new("https://github.com/acme/skills"),
            Source::new("https://github.com/acme/tools.git")
                .with_branch("stable")
                .with_exclude(["docs", "examples"]),
        ]
    );
}

#[test]
fn test_load_sources_empty_list_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sources.skill.json");
    fs::write(&path, r#"{ "sources": [] }"#).unwrap();

    let err = SourcesFile::load(&path).unwrap_err();
    assert!(matches!(err, Error::EmptySources { .. }));
}

#[test]
fn test_load_sources_missing_list_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sources.skill.json");
    fs::write(&path, r#"{ "$schema": "x" }"#).unwrap();

    assert!(matches!(
        SourcesFile::load(&path).unwrap_err(),
        Error::EmptySources { .. }
    ));
}

#[test]
fn test_load_sources_missing_repo_field_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sources.skill.json");
    fs::write(&path, r#"{ "sources": [ { "branch": "main" } ] }"#).unwrap();

    let err = SourcesFile::load(&path).unwrap_err();
    assert!(matches!(err, Error::Fs(skill_fs::Error::ConfigParse { .. })));
}

#[test]
fn test_load_sources_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = SourcesFile::load(&temp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Fs(skill_fs::Error::Io { .. })));
}

#[test]
fn test_empty_branch_means_default() {
    assert_eq!(Source::new("r").with_branch("").branch(), None);
    assert_eq!(Source::new("r").with_branch("dev").branch(), Some("dev"));
    assert_eq!(Source::new("r").branch(), None);
}

#[test]
fn test_missing_index_is_empty() {
    let temp = TempDir::new().unwrap();
    let index = IndexFile::load_or_default(&temp.path().join("index.skill.json")).unwrap();
    assert_eq!(index, IndexFile::default());
}

#[test]
fn test_index_written_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("index.skill.json");
    let index = IndexFile {
        schema: Some("./index.schema.json".into()),
        generated_at: Some("2026-01-02T03:04:05Z".into()),
        skills: vec![SkillEntry {
            name: "foo".into(),
            path: "skills/foo".into(),
            repo: "https://github.com/acme/skills".into(),
            head: "abc123".into(),
            updated_at: "2026-01-02T03:04:05Z".into(),
        }],
    };

    index.save(&path).unwrap();

    let expected = r#"{
  "$schema": "./index.schema.json",
  "generatedAt": "2026-01-02T03:04:05Z",
  "skills": [
    {
      "name": "foo",
      "path": "skills/foo",
      "repo": "https://github.com/acme/skills",
      "head": "abc123",
      "updatedAt": "2026-01-02T03:04:05Z"
    }
  ]
}
"#;
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    assert_eq!(IndexFile::load_or_default(&path).unwrap(), index);
}

#[test]
fn test_index_without_schema_or_timestamp() {
    let rendered = ConfigStore::new()
        .render(std::path::Path::new("index.skill.json"), &IndexFile::default())
        .unwrap();
    assert_eq!(rendered, "{\n  \"skills\": []\n}\n");
}

#[test]
fn test_sidecar_omits_absent_fields() {
    let temp = TempDir::new().unwrap();
    let meta = SkillMeta {
        head: Some("abc".into()),
        checked_at: Some("2026-01-02T03:04:05Z".into()),
        ..SkillMeta::new("foo")
    };

    meta.save(temp.path()).unwrap();

    let raw = fs::read_to_string(temp.path().join("skill.meta.json")).unwrap();
    assert_eq!(
        raw,
        "{\n  \"name\": \"foo\",\n  \"head\": \"abc\",\n  \"checkedAt\": \"2026-01-02T03:04:05Z\"\n}\n"
    );
    assert_eq!(SkillMeta::load(temp.path()).unwrap(), meta);
}

#[test]
fn test_sidecar_field_names() {
    let meta = SkillMeta {
        description: Some("Does things".into()),
        version: Some("1.2.0".into()),
        head: Some("abc".into()),
        updated_at: Some("u".into()),
        checked_at: Some("c".into()),
        ..SkillMeta::new("foo")
    };
    let value = serde_json::to_value(&meta).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["checkedAt", "description", "head", "name", "updatedAt", "version"]
    );
}
