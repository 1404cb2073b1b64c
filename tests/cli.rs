use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn imgtag() -> Command {
    Command::cargo_bin("imgtag").unwrap()
}

#[test]
fn runs() {
    let mut cmd = imgtag();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("imgtag --help"));
}

#[test]
fn outputs_tool_name() {
    let mut cmd = imgtag();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(format!("imgtag {}\n", env!("CARGO_PKG_VERSION")));
}

// slice subcommand

#[test]
fn slice_to_stdout_as_json() {
    let mut cmd = imgtag();
    cmd.arg("slice")
        .arg("--exiftool")
        .arg(fixture("sample.exiftool.json"))
        .args(["--output", "-", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let records: Value = serde_json::from_slice(&output).expect("stdout is json");
    let records = records.as_array().expect("array of records");
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["title"], serde_json::json!(["Harbour at dusk"]));
    assert_eq!(records[0]["creator"], serde_json::json!(["Jane Doe"]));
    assert_eq!(
        records[0]["description"],
        serde_json::json!(["Fishing boats returning"])
    );
    assert_eq!(
        records[0]["subject"],
        serde_json::json!(["Places", "Portugal", "Lisbon", "Time", "Dusk", "Boats"])
    );
    assert_eq!(records[0]["format"], "image/jpeg");

    assert_eq!(records[1]["title"], serde_json::json!(["img002"]));
    assert_eq!(
        records[1]["subject"],
        serde_json::json!(["Animals", "Dogs", "Poodle", "Places", "Park"])
    );
    assert_eq!(records[1]["identifier"], "photos/img002.png");
    assert!(records[1].get("creator").is_none());
}

#[test]
fn bare_inputs_write_default_yaml_file() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut cmd = imgtag();
    cmd.current_dir(temp.path())
        .arg("--exiftool")
        .arg(fixture("sample.exiftool.json"));
    cmd.assert().success();

    let yaml = fs::read_to_string(temp.path().join("images.yaml")).expect("images.yaml");
    assert!(yaml.contains("identifier: photos/img001.jpg"));
    assert!(yaml.contains("- Harbour at dusk"));
    assert!(yaml.ends_with("---\n"));
}

#[test]
fn slice_output_extension_selects_format() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut cmd = imgtag();
    cmd.current_dir(temp.path())
        .arg("slice")
        .arg("--exiftool")
        .arg(fixture("sample.exiftool.json"))
        .args(["-o", "gallery.json"]);
    cmd.assert().success();

    let text = fs::read_to_string(temp.path().join("gallery.json")).expect("gallery.json");
    let records: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(records.as_array().map(Vec::len), Some(2));
}

// each subcommand

#[test]
fn each_writes_sidecars_next_to_inputs() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(temp.path().join("photos")).expect("create photos dir");

    let mut cmd = imgtag();
    cmd.current_dir(temp.path())
        .arg("each")
        .arg("--exiftool")
        .arg(fixture("sample.exiftool.json"));
    cmd.assert().success();

    let first = fs::read_to_string(temp.path().join("photos/img001.yaml")).expect("img001.yaml");
    assert!(first.starts_with("title:\n- Harbour at dusk\n"));
    assert!(temp.path().join("photos/img002.yaml").exists());
}

#[test]
fn each_respects_json_and_ext_flags() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(temp.path().join("photos")).expect("create photos dir");

    let mut cmd = imgtag();
    cmd.current_dir(temp.path())
        .args(["each", "--json", "--ext", "meta.json"])
        .arg("--exiftool")
        .arg(fixture("sample.exiftool.json"));
    cmd.assert().success();

    let text = fs::read_to_string(temp.path().join("photos/img002.meta.json"))
        .expect("img002.meta.json");
    let record: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(record["title"], serde_json::json!(["img002"]));
}

#[test]
fn each_keeps_writing_after_a_failed_sidecar() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let dump = temp.path().join("dump.json");
    fs::write(
        &dump,
        r#"[{"SourceFile": "no-such-dir/a.jpg", "Title": "A"},
            {"SourceFile": "b.jpg", "Title": "B"}]"#,
    )
    .expect("write dump");

    let mut cmd = imgtag();
    cmd.current_dir(temp.path())
        .arg("each")
        .arg("--exiftool")
        .arg(&dump);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 file(s) failed"));

    let written = fs::read_to_string(temp.path().join("b.yaml")).expect("b.yaml");
    assert!(written.starts_with("title:\n- B\n"));
    assert!(!temp.path().join("no-such-dir").exists());
}

// hugo subcommand

#[test]
fn hugo_writes_front_matter() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut cmd = imgtag();
    cmd.current_dir(temp.path())
        .args(["hugo", "--name", "Lisbon Trip"])
        .arg("--exiftool")
        .arg(fixture("sample.exiftool.json"));
    cmd.assert().success();

    let text = fs::read_to_string(temp.path().join("lisbon-trip.md")).expect("front matter");
    assert!(text.starts_with("---\ntitle: Lisbon Trip\n"));
    assert!(text.contains("- Poodle"));
    assert!(text.contains("images:"));
    assert!(text.ends_with("---\n"));
}

// failure isolation

#[test]
fn malformed_file_fails_but_others_are_written() {
    let mut cmd = imgtag();
    cmd.arg("slice")
        .arg("--exiftool")
        .arg(fixture("mixed.exiftool.json"))
        .args(["-o", "-", "--json"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("photos/fine.webp"))
        .stdout(predicate::str::contains("Kyoto"))
        .stdout(predicate::str::contains("Never written").not())
        .stderr(predicate::str::contains("photos/broken.jpg"))
        .stderr(predicate::str::contains("1 of 2 file(s) failed"));
}

#[test]
fn missing_image_file_fails() {
    let mut cmd = imgtag();
    cmd.args(["slice", "does_not_exist.jpg", "-o", "-"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does_not_exist.jpg"));
}

#[test]
fn subcommand_without_inputs_fails() {
    let mut cmd = imgtag();
    cmd.arg("each");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No input files given"));
}

// tags subcommand

#[test]
fn tags_flattens_and_dedups() {
    let mut cmd = imgtag();
    cmd.args(["tags", "A|B|C", "A/B/D", "E > F"]);
    cmd.assert().success().stdout("A\nB\nC\nD\nE\nF\n");
}

#[test]
fn tags_markup_output_is_leaf_only() {
    let mut cmd = imgtag();
    cmd.args([
        "tags",
        "--markup",
        "<Categories><Category>Animals<Category>Dogs</Category></Category></Categories>",
    ]);
    cmd.assert().success().stdout(
        "<Categories><Category>Animals</Category><Category>Dogs</Category></Categories>\n",
    );
}

#[test]
fn tags_malformed_markup_fails() {
    let mut cmd = imgtag();
    cmd.args(["tags", "--field", "Categories", "<Categories><Category>Oops"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized Categories value"));
}

#[test]
fn tags_unknown_field_fails() {
    let mut cmd = imgtag();
    cmd.args(["tags", "--field", "LensModel", "x"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field: 'LensModel'"));
}
