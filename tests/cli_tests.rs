//! Command-line interface tests
//!
//! Run the `birdnames` binary against the embedded tables (and a temporary
//! data directory) and check its output in each format.

use assert_cmd::Command;
use predicates::prelude::*;

fn birdnames() -> Command {
    let mut cmd = Command::cargo_bin("birdnames").unwrap();
    cmd.env_remove("BIRDNAMES_DATA_DIR");
    cmd
}

#[test]
fn test_help() {
    birdnames()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("guess"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_convert_common_to_scientific() {
    birdnames()
        .args(["convert", "--from-type", "common", "--to-type", "scientific"])
        .args(["American Robin", "blue jay"])
        .assert()
        .success()
        .stdout("Turdus migratorius\nCyanocitta cristata\n");
}

#[test]
fn test_convert_unresolved_prints_na() {
    birdnames()
        .args(["convert", "--from-type", "common", "--to-type", "scientific"])
        .args(["Northern Cardinal", "Not A Bird"])
        .assert()
        .success()
        .stdout("Cardinalis cardinalis\nNA\n");
}

#[test]
fn test_convert_cross_authority() {
    birdnames()
        .args(["convert", "--from-type", "ebird_code", "--to-type", "alpha"])
        .args(["--from-authority", "ebird", "--to-authority", "ibp"])
        .args(["amerob", "blujay"])
        .assert()
        .success()
        .stdout("AMRO\nBLJA\n");
}

#[test]
fn test_convert_fuzzy_flag() {
    let base = ["convert", "--from-type", "common", "--to-type", "alpha", "--to-authority", "bbl"];

    birdnames()
        .args(base)
        .arg("Amercan Robin")
        .assert()
        .success()
        .stdout("NA\n");

    birdnames()
        .args(base)
        .args(["--fuzzy", "Amercan Robin"])
        .assert()
        .success()
        .stdout("AMRO\n");
}

#[test]
fn test_convert_json_output() {
    birdnames()
        .args(["--format", "json", "convert", "--from-type", "common", "--to-type", "alpha"])
        .args(["--to-authority", "ibp", "American Robin", "Eurasian Blackbird"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output\": \"AMRO\""))
        .stdout(predicate::str::contains("\"output\": null"))
        .stdout(predicate::str::contains("\"kind\": \"bridge_broken\""));
}

#[test]
fn test_convert_tsv_output() {
    birdnames()
        .args(["--format", "tsv", "convert", "--from-type", "scientific", "--to-type", "family"])
        .arg("turdus migratorius")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("input\toutput\tmatch\tconfidence\tstatus\n"))
        .stdout(predicate::str::contains("turdus migratorius\tTurdidae\tsoft\t1.000\tok"));
}

#[test]
fn test_convert_from_stdin() {
    birdnames()
        .args(["convert", "--from-type", "common", "--to-type", "scientific", "--input", "-"])
        .write_stdin("Blue Jay\nAmerican Robin\n")
        .assert()
        .success()
        .stdout("Cyanocitta cristata\nTurdus migratorius\n");
}

#[test]
fn test_convert_unsupported_name_type() {
    birdnames()
        .args(["convert", "--from-type", "french", "--to-type", "scientific", "Geai bleu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("avilist does not publish french_name"));
}

#[test]
fn test_convert_unknown_authority() {
    birdnames()
        .args(["convert", "--from-type", "common", "--to-type", "scientific"])
        .args(["--from-authority", "hbw", "Blue Jay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown authority"));
}

#[test]
fn test_convert_unknown_year() {
    birdnames()
        .args(["convert", "--from-type", "common", "--to-type", "scientific"])
        .args(["--from-year", "2001", "Blue Jay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No avilist taxonomy for 2001"));
}

#[test]
fn test_convert_requires_names() {
    birdnames()
        .args(["convert", "--from-type", "common", "--to-type", "scientific"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No names given"));
}

#[test]
fn test_guess_alpha() {
    birdnames()
        .args(["guess", "alpha", "Turdus migratorius", "Cyanocitta cristata"])
        .assert()
        .success()
        .stdout("AMRO\nBLJA\n");
}

#[test]
fn test_guess_on_unmatched_error() {
    birdnames()
        .args(["guess", "scientific", "--on-unmatched", "error", "AMRO", "ZZZZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZZZZ"));
}

#[test]
fn test_detect() {
    birdnames()
        .args(["detect", "AMRO", "BLJA", "XXXX"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected: alpha_code_4 (ibp 2024)"))
        .stdout(predicate::str::contains("XXXX"));
}

#[test]
fn test_list() {
    birdnames()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ebird"))
        .stdout(predicate::str::contains("2023"))
        .stdout(predicate::str::contains("french_name"));
}

#[test]
fn test_list_json() {
    birdnames()
        .args(["--format", "json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"generated_at\""))
        .stdout(predicate::str::contains("\"authority\": \"birdlife\""));
}

#[test]
fn test_show_across_authorities() {
    birdnames()
        .args(["show", "amerob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("species_code"))
        .stdout(predicate::str::contains("AMRO"))
        .stdout(predicate::str::contains("Merle d'Amérique"));
}

#[test]
fn test_show_not_listed() {
    birdnames()
        .args(["show", "Eurasian Blackbird", "--authority", "ibp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not listed)"));
}

#[test]
fn test_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bbl_2030_taxonomy.csv"),
        "scientific_name,bbl_common_name,bbl_alpha,bbl_french_name,genus\n\
         Turdus migratorius,American Robin,AMRO,Merle d'Amérique,Turdus\n",
    )
    .unwrap();

    birdnames()
        .arg("--data-dir")
        .arg(dir.path())
        .args(["convert", "--from-type", "alpha", "--to-type", "french", "--from-authority", "bbl", "AMRO"])
        .assert()
        .success()
        .stdout("Merle d'Amérique\n");

    birdnames()
        .env("BIRDNAMES_DATA_DIR", dir.path())
        .args(["--format", "tsv", "list"])
        .assert()
        .success()
        .stdout("authority\tyear\tname_types\nbbl\t2030\tscientific_name,common_name,genus,alpha_code_4,french_name\n");
}
