use std::process::Command;

fn parlacorpus() -> Command {
    Command::new(env!("CARGO_BIN_EXE_parlacorpus"))
}

#[test]
fn cli_clean_strips_timestamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("episode.txt");
    std::fs::write(&path, "00:00:01 --> 00:00:02\n[Jane Doe]\nHallo.\n\n").expect("write");

    let output = parlacorpus()
        .arg("clean")
        .arg(dir.path())
        .output()
        .expect("run CLI");

    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        std::fs::read_to_string(&path).expect("read"),
        "[Jane Doe]\nHallo.\n\n"
    );
}

#[test]
fn cli_missing_argument_prints_usage() {
    let output = parlacorpus().arg("speeches").output().expect("run CLI");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn cli_rejects_single_token_name_before_any_work() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = parlacorpus()
        .arg("--data-dir")
        .arg(dir.path())
        .args(["assemble", "Merkel"])
        .output()
        .expect("run CLI");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("first and a last name"));
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn cli_assemble_writes_corpus() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("raw_data").join("doe");
    std::fs::create_dir_all(&raw).expect("mkdir");
    std::fs::write(raw.join("show.txt"), "[Jane Doe]\nHello there\n\nother text\n").expect("write");
    std::fs::write(raw.join("speech_collection.txt"), "").expect("write");

    let output = parlacorpus()
        .arg("--data-dir")
        .arg(dir.path())
        .args(["assemble", "Jane Doe", "--train-split", "1.0"])
        .output()
        .expect("run CLI");

    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let corpus = dir.path().join("input_data").join("doe");
    assert_eq!(
        std::fs::read_to_string(corpus.join("training_data.txt")).expect("read"),
        "<BOS> Hello there <EOS>"
    );
    assert_eq!(
        std::fs::read_to_string(corpus.join("validation_data.txt")).expect("read"),
        ""
    );
    assert!(corpus.join("manifest.json").exists());
}
