use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(assert_cmd::cargo::cargo_bin!("generate-android-translations"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn write_arb(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_default_paths_without_arguments() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_arb(
        &root.join("lib/l10n"),
        "app_en.arb",
        r#"{"accessibility_service_label": "Service", "btn_cancel": "Cancel", "unrelated_key": "x"}"#,
    );

    let output = run_in(root, &[]);
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let xml_path = root.join("android/app/src/main/res/values-en/strings.xml");
    let xml = fs::read_to_string(&xml_path).unwrap();
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <resources>\n    \
         <string name=\"accessibility_service_label\">Service</string>\n    \
         <string name=\"btn_cancel\">Cancel</string>\n\
         </resources>\n"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created translation for en:"));
    assert!(stdout.contains("values-en"));
}

#[test]
fn test_long_identifiers_are_not_processed() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("l10n");
    let res = temp_dir.path().join("res");
    write_arb(&source, "app_english.arb", r#"{"btn_cancel": "Cancel"}"#);
    write_arb(&source, "app_fr.arb", r#"{"btn_cancel": "Annuler"}"#);

    let output = run_in(
        temp_dir.path(),
        &["-s", source.to_str().unwrap(), "-o", res.to_str().unwrap()],
    );
    assert!(output.status.success());

    assert!(res.join("values-fr/strings.xml").is_file());
    assert!(!res.join("values-english").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Created translation for").count(), 1);
}

#[test]
fn test_non_ascii_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("l10n");
    let res = temp_dir.path().join("res");
    write_arb(
        &source,
        "app_zh.arb",
        r#"{"accessibility_service_label": "屏幕翻译", "btn_cancel": "取消"}"#,
    );

    let output = run_in(
        temp_dir.path(),
        &["--source", source.to_str().unwrap(), "--output", res.to_str().unwrap()],
    );
    assert!(output.status.success());

    let xml = fs::read_to_string(res.join("values-zh/strings.xml")).unwrap();
    assert!(xml.contains(">屏幕翻译</string>"));
    assert!(xml.contains(">取消</string>"));
    assert!(!xml.contains("&#"));
}

#[test]
fn test_missing_source_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_in(temp_dir.path(), &["--source", "nowhere"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: cannot read source directory `nowhere`"));
}

#[test]
fn test_malformed_file_aborts_unless_keep_going() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("l10n");
    let res = temp_dir.path().join("res");
    write_arb(&source, "app_de.arb", "{ \"btn_cancel\": ");
    write_arb(&source, "app_fr.arb", r#"{"btn_cancel": "Annuler"}"#);
    let base = ["-s", source.to_str().unwrap(), "-o", res.to_str().unwrap()];

    let output = run_in(temp_dir.path(), &base);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("app_de.arb: parse error"));

    let mut args = base.to_vec();
    args.push("--keep-going");
    let output = run_in(temp_dir.path(), &args);
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(res.join("values-fr/strings.xml").is_file());
    assert!(String::from_utf8_lossy(&output.stdout).contains("skipped 1"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("l10n");
    let res = temp_dir.path().join("res");
    write_arb(&source, "app_fr.arb", r#"{"btn_cancel": "Annuler"}"#);

    let output = run_in(
        temp_dir.path(),
        &["-s", source.to_str().unwrap(), "-o", res.to_str().unwrap(), "--dry-run"],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Would create translation for fr"));
    assert!(!res.exists());
}

#[test]
fn test_config_file_overrides_keys() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("l10n");
    let res = temp_dir.path().join("res");
    write_arb(
        &source,
        "app_fr.arb",
        r#"{"btn_cancel": "Annuler", "app_title": "Traducteur"}"#,
    );
    let config = temp_dir.path().join("arbgen.toml");
    fs::write(
        &config,
        format!(
            "source_dir = {:?}\noutput_dir = {:?}\nkeys = [\"app_title\"]\n",
            source.to_str().unwrap(),
            res.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = run_in(temp_dir.path(), &["--config", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let xml = fs::read_to_string(res.join("values-fr/strings.xml")).unwrap();
    assert!(xml.contains("<string name=\"app_title\">Traducteur</string>"));
    assert!(!xml.contains("btn_cancel"));
}
