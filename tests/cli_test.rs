//! CLI integration tests for daycare-forms binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("daycare-forms"))
}

// Helper to create a temp shape file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const VALID_RESERVATION: &str = r#"{
    "date": "2024-03-04",
    "times": { "startTime": "08:00", "endTime": "16:00" },
    "absent": false
}"#;

const INVALID_RESERVATION: &str = r#"{
    "date": null,
    "times": { "startTime": "16:00", "endTime": "08:00" },
    "absent": false
}"#;

mod validate_command {
    use super::*;

    #[test]
    fn validate_valid_shape() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", VALID_RESERVATION);

        cmd()
            .args(["validate", shape.to_str().unwrap(), "--form", "reservation"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"))
            .stdout(predicate::str::contains("2024-03-04"));
    }

    #[test]
    fn validate_invalid_shape() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", INVALID_RESERVATION);

        cmd()
            .args([
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "reservation",
                "--lang",
                "en",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Validation failed"))
            .stderr(predicate::str::contains("/date: required (Required)"))
            .stderr(predicate::str::contains("/times: timeFormat"));
    }

    #[test]
    fn validate_reports_messages_in_finnish_by_default() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", INVALID_RESERVATION);

        cmd()
            .args(["validate", shape.to_str().unwrap(), "--form", "reservation"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Pakollinen tieto"));
    }

    #[test]
    fn production_reports_messages_in_finnish_by_default() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", INVALID_RESERVATION);

        cmd()
            .args([
                "--env",
                "production",
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "reservation",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Pakollinen tieto"));
    }

    #[test]
    fn validate_json_output_valid() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", VALID_RESERVATION);

        cmd()
            .args([
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "reservation",
                "--json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""valid":true"#))
            .stdout(predicate::str::contains(r#""output":"#));
    }

    #[test]
    fn validate_json_output_invalid() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", INVALID_RESERVATION);

        cmd()
            .args([
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "reservation",
                "--json",
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(
                r#""errors":{"date":"required","times":"timeFormat"}"#,
            ))
            .stdout(predicate::str::contains(r#""path":"/date""#));
    }

    #[test]
    fn validate_json_output_file_error() {
        cmd()
            .args([
                "validate",
                "/nonexistent/shape.json",
                "--form",
                "absence",
                "--json",
            ])
            .assert()
            .code(3)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""error":"#));
    }

    #[test]
    fn production_omits_output() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", VALID_RESERVATION);

        cmd()
            .args([
                "--env",
                "production",
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "reservation",
                "--json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"valid":true}"#));
    }

    #[test]
    fn validate_absence() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(
            &dir,
            "absence.json",
            r#"{
                "period": { "startDate": "2024-01-05", "endDate": "2024-01-10" },
                "absenceType": "SICKLEAVE",
                "note": "  flu  "
            }"#,
        );

        cmd()
            .args([
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "absence",
                "--json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""absenceType":"SICKLEAVE""#))
            .stdout(predicate::str::contains(r#""note":"flu""#));
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn file_not_found() {
        cmd()
            .args(["validate", "/nonexistent/shape.json", "--form", "placement"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn invalid_json_shape() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "bad.json", r#"{ not valid json"#);

        cmd()
            .args(["validate", shape.to_str().unwrap(), "--form", "placement"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn root_issue_has_empty_pointer_in_json() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "string.json", r#""reservation""#);

        cmd()
            .args([
                "validate",
                shape.to_str().unwrap(),
                "--form",
                "reservation",
                "--json",
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""path":"""#));
    }

    #[test]
    fn shape_of_wrong_json_type() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "array.json", r#"[1, 2, 3]"#);

        cmd()
            .args(["validate", shape.to_str().unwrap(), "--form", "placement"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("(root): shape"));
    }
}

mod required_args {
    use super::*;

    #[test]
    fn missing_form_flag() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", VALID_RESERVATION);

        cmd()
            .args(["validate", shape.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--form"));
    }

    #[test]
    fn unknown_form() {
        let dir = TempDir::new().unwrap();
        let shape = write_temp_file(&dir, "shape.json", VALID_RESERVATION);

        cmd()
            .args(["validate", shape.to_str().unwrap(), "--form", "invoice"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn missing_shape_path() {
        cmd()
            .args(["validate", "--form", "reservation"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("SHAPE"));
    }
}

mod listing {
    use super::*;

    #[test]
    fn forms_lists_builtin_forms() {
        cmd()
            .arg("forms")
            .assert()
            .success()
            .stdout(predicate::str::contains("reservation"))
            .stdout(predicate::str::contains("absence"))
            .stdout(predicate::str::contains("placement"))
            .stdout(predicate::str::contains("absenceType"));
    }

    #[test]
    fn forms_as_json() {
        cmd()
            .args(["forms", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""name": "placement""#));
    }

    #[test]
    fn messages_in_swedish() {
        cmd()
            .args(["messages", "--lang", "sv"])
            .assert()
            .success()
            .stdout(predicate::str::contains("timeFormat"))
            .stdout(predicate::str::contains("Obligatorisk uppgift"));
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_flag() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Validate daycare form shapes"));
    }

    #[test]
    fn version_flag() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("daycare-forms"));
    }

    #[test]
    fn validate_help() {
        cmd()
            .args(["validate", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--form"))
            .stdout(predicate::str::contains("--lang"))
            .stdout(predicate::str::contains("--json"));
    }
}
