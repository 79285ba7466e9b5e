use assert_cmd::Command;
use predicates::prelude::*;
use rinex_lnav::prelude::*;
use std::{path::PathBuf, str::FromStr};

fn workspace(name: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join("rnxconv-tests")
        .join(format!("{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&path);
    std::fs::create_dir_all(&path).unwrap();
    path
}

fn document_v2() -> ObservationFile {
    let mut header = HeaderV2::default()
        .with_observables(&["C1", "L1", "P2", "L2"])
        .with_comment("synthetic");
    header.valid |= ValidV2::REQUIRED;

    let t0 = Epoch::from_gpst_seconds(1.0E9);
    let records = (0..3)
        .map(|i| {
            let mut record = ObsRecordV2::new(t0 + Duration::from_seconds(30.0 * i as f64));
            for sv in [
                SV::new(Constellation::GPS, 1),
                SV::new(Constellation::Glonass, 4),
            ] {
                for (j, code) in ["C1", "L1", "P2", "L2"].iter().enumerate() {
                    record = record.with_observation(
                        sv,
                        Observable::from_str(code).unwrap(),
                        ObsDatum::new(2.0E7 + 1000.0 * j as f64),
                    );
                }
            }
            record
        })
        .collect();

    ObservationFile::V2(ObsFileV2 { header, records })
}

fn write_document(path: &PathBuf, document: &ObservationFile) {
    let content = serde_json::to_string(document).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read_document(path: &PathBuf) -> ObservationFile {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn license() {
    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-l")
        .assert()
        .success()
        .stdout(predicate::str::contains("MPL-2.0"));
}

#[test]
fn bad_arguments() {
    Command::cargo_bin("rnxconv")
        .unwrap()
        .args(["-v", "9"])
        .assert()
        .code(2);
    Command::cargo_bin("rnxconv")
        .unwrap()
        .args(["--marker-type", "SUBMARINE"])
        .assert()
        .code(2);
}

#[test]
fn no_input_files() {
    let dir = workspace("empty");
    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-i")
        .arg(&dir)
        .assert()
        .code(1);
}

#[test]
fn v2_to_v3_and_back() {
    let dir = workspace("roundtrip");
    let input = dir.join("obs.json");
    let output = dir.join("obs3.json");
    write_document(&input, &document_v2());

    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-f")
        .arg(format!("{}:{}", input.display(), output.display()))
        .args(["--marker-type", "GEODETIC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 converted, 0 skipped"));

    let v3 = match read_document(&output) {
        ObservationFile::V3(v3) => v3,
        _ => panic!("expecting a RINEX-3 document"),
    };
    assert_eq!(v3.records.len(), 3);
    assert_eq!(v3.header.marker_type, MarkerType::Geodetic);
    assert_eq!(v3.header.comments, vec!["synthetic".to_string()]);
    let systems: Vec<_> = v3.header.observables.keys().copied().collect();
    assert_eq!(systems, vec![Constellation::GPS, Constellation::Glonass]);

    // back to RINEX-2, default output name
    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-f")
        .arg(&output)
        .arg("--no-comments")
        .assert()
        .success();

    match read_document(&dir.join("obs3.rnx2.json")) {
        ObservationFile::V2(v2) => {
            assert_eq!(v2.records.len(), 3);
            assert!(v2.header.comments.is_empty());
        },
        _ => panic!("expecting a RINEX-2 document"),
    }
}

#[test]
fn input_directory() {
    let dir = workspace("inpath");
    let outdir = dir.join("converted");
    write_document(&dir.join("a.json"), &document_v2());
    write_document(&dir.join("b.json"), &document_v2());
    std::fs::write(dir.join("notes.txt"), "not a document").unwrap();

    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-i")
        .arg(&dir)
        .arg("-o")
        .arg(&outdir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 file(s) converted, 0 failure(s)"));

    assert!(outdir.join("a.rnx3.json").exists());
    assert!(outdir.join("b.rnx3.json").exists());
}

#[test]
fn nothing_converted() {
    let dir = workspace("corrupt");
    let input = dir.join("corrupt.json");
    std::fs::write(&input, "{ \"V2\": 42 }").unwrap();

    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-f")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0 file(s) converted, 1 failure(s)"));
}

#[test]
fn strict_codes() {
    let dir = workspace("strict");
    let input = dir.join("obs.json");
    let mut document = document_v2();
    if let ObservationFile::V2(file) = &mut document {
        file.header = file.header.with_observables(&["C1", "L1", "P2", "L2", "C9"]);
    }
    write_document(&input, &document);

    // tolerated by default
    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-f")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown codes: C9"));

    Command::cargo_bin("rnxconv")
        .unwrap()
        .arg("-f")
        .arg(&input)
        .arg("--strict")
        .assert()
        .code(1);
}
