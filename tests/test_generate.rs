//! End-to-end generation tests driving the public API

use std::fs;
use std::path::Path;

use sgt::codegen::{generate_from_file, generate_with_tables, GenerationConfig, ProjectConfig};
use sgt::{CodegenError, ColumnInfo, TableMetadata};
use tempfile::TempDir;

const USER_PROFILE_YAML: &str = r#"
models:
  - name: user_profile
    fields:
      - name: nick_name
        type: string
"#;

fn write_config(dir: &Path, name: &str, yaml: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, yaml).unwrap();
    path
}

fn column(name: &str, native_type: &str) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        native_type: native_type.to_string(),
        nullable: true,
        key: String::new(),
    }
}

#[test]
fn test_user_profile_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "init.yaml", USER_PROFILE_YAML);
    let out = dir.path().join("out");

    let report = generate_from_file(&config, &out, false).expect("generation failed");
    assert_eq!(report.entities.len(), 1);

    let path = out.join("models/user_profile/gen_user_profile.go");
    assert_eq!(report.written, vec![path.clone()]);

    let code = fs::read_to_string(&path).unwrap();
    assert!(code.contains("type UserProfile struct {"));
    assert!(code.contains("NickName string `json:\"nick_name\" orm:\"column(nick_name)\"`"));
    for name in [
        "AddUserProfile",
        "GetUserProfile",
        "GetUserProfileByWhere",
        "SelectUserProfileByWhere",
        "CountUserProfileByWhere",
        "UpdateUserProfile",
    ] {
        assert!(code.contains(&format!("func {name}(")), "missing {name}");
    }
}

#[test]
fn test_generating_twice_overwrites() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let path = out.join("models/user_profile/gen_user_profile.go");

    let first = write_config(
        dir.path(),
        "first.yaml",
        r#"
models:
  - name: user_profile
    comment: first version with a much longer description than the second
    fields:
      - name: nick_name
        type: string
      - name: signature
        type: string
"#,
    );
    generate_from_file(&first, &out, false).unwrap();
    let first_content = fs::read(&path).unwrap();

    let second = write_config(dir.path(), "second.yaml", USER_PROFILE_YAML);
    generate_from_file(&second, &out, false).unwrap();
    let second_content = fs::read(&path).unwrap();

    generate_from_file(&second, &out, false).unwrap();
    let third_content = fs::read(&path).unwrap();

    assert_ne!(first_content, second_content);
    assert_eq!(second_content, third_content);
    assert!(!String::from_utf8(second_content).unwrap().contains("signature"));

    let entries: Vec<_> = fs::read_dir(out.join("models/user_profile")).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_duplicate_model_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "init.yaml",
        r#"
models:
  - name: user_profile
  - name: UserProfile
"#,
    );
    let out = dir.path().join("out");

    let err = generate_from_file(&config, &out, false).unwrap_err();
    assert!(matches!(err, CodegenError::DuplicateModel { .. }));
    assert!(!out.exists());
}

#[test]
fn test_duplicate_field_names_model_and_field() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        "init.yaml",
        r#"
models:
  - name: account
    fields:
      - name: user_id
        type: int64
      - name: UserId
        type: int64
"#,
    );

    let err = generate_from_file(&config, &dir.path().join("out"), false).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Account"), "{message}");
    assert!(message.contains("UserId"), "{message}");
}

#[test]
fn test_introspected_table_drops_implicit_columns() {
    let dir = TempDir::new().unwrap();
    let mut config = GenerationConfig::new(ProjectConfig::default(), dir.path());
    config.format = false;

    let table = TableMetadata {
        table_name: "member".to_string(),
        alias: None,
        columns: vec![
            column("id", "int(11)"),
            column("name", "varchar(32)"),
            column("created", "bigint(20)"),
            column("updated", "bigint(20)"),
            column("deleted", "tinyint(1)"),
        ],
    };

    let report = generate_with_tables(&config, vec![table]).unwrap();
    let entity = &report.entities[0];
    assert_eq!(entity.fields.len(), 1);
    assert_eq!(entity.fields[0].origin_name, "name");

    let code = fs::read_to_string(dir.path().join("models/member/gen_member.go")).unwrap();
    assert!(code.contains("SELECT id, `name`, created, updated, deleted FROM "));
    assert!(code.contains("ormer.Update(updPro, `name`, `updated`, `deleted`)"));
}

#[test]
fn test_formatter_failure_still_leaves_files() {
    let dir = TempDir::new().unwrap();
    let mut project = ProjectConfig::from_yaml_str(USER_PROFILE_YAML).unwrap();
    project.codegen.formatter = vec!["false".to_string()];
    let config = GenerationConfig::new(project, dir.path());

    let err = generate_with_tables(&config, vec![]).unwrap_err();
    assert!(matches!(err, CodegenError::FormatterFailed { .. }));
    assert!(dir.path().join("models/user_profile/gen_user_profile.go").exists());
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = generate_from_file(&dir.path().join("absent.yaml"), dir.path(), false).unwrap_err();
    assert!(matches!(err, CodegenError::ReadConfig { .. }));
}

#[test]
fn test_shipped_example_config_runs_on_default_build() {
    let dir = TempDir::new().unwrap();
    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/examples/init.yaml");

    let report = generate_from_file(&config, dir.path(), false).expect("example config failed");
    assert_eq!(report.written, vec![dir.path().join("models/user_profile/gen_user_profile.go")]);

    let code = fs::read_to_string(&report.written[0]).unwrap();
    assert!(code.contains("\t_Online bool `orm:\"-\" json:\"online\"`\n"));
    assert!(code.contains("utils.SetCache(key, u, 60)"));
}

#[test]
fn test_example_mysql_config_parses() {
    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/examples/init_mysql.yaml");
    let project = ProjectConfig::from_file(&config).unwrap();
    assert_eq!(project.db_configs.len(), 1);
    assert_eq!(project.db_configs[0].alias_name.as_deref(), Some("shop_order"));
}
