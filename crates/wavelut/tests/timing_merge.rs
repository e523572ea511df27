//! Merging peer runtime logs into a `.dat` matrix.

use std::fs;
use std::path::Path;

use wavelut::timing::{log_path, mean_time, TimingMatrix};
use wavelut::LutError;

fn write_log(dir: &Path, n: u32, depth: u32, name: &str, peer: u32, rows: &[(&str, f64)]) {
    let body: String = rows.iter().map(|(tag, v)| format!("{tag},{v}\n")).collect();
    fs::write(log_path(dir, n, depth, name, peer), body).unwrap();
}

#[test]
fn test_log_path_layout() {
    let p = log_path(Path::new("logs"), 10, 3, "haar", 1);
    assert_eq!(p, Path::new("logs/n_10_J_3_haar_peer1.log"));
}

#[test]
fn test_mean_time_ignores_other_tags() {
    let dir = tempfile::tempdir().unwrap();
    write_log(
        dir.path(),
        4,
        1,
        "haar",
        0,
        &[("setup_ms", 900.0), ("haar_time_ms", 10.0), ("bior_time_ms", 1.0), ("haar_time_ms", 20.0)],
    );
    let path = log_path(dir.path(), 4, 1, "haar", 0);
    assert!((mean_time(&path, "haar").unwrap() - 15.0).abs() < 1e-12);
}

#[test]
fn test_mean_time_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), 4, 1, "bior", 0, &[("haar_time_ms", 3.0)]);
    let path = log_path(dir.path(), 4, 1, "bior", 0);
    assert!(matches!(
        mean_time(&path, "bior"),
        Err(LutError::MissingTiming { ref tag, .. }) if tag == "bior_time_ms"
    ));
}

#[test]
fn test_unparsable_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let path = log_path(dir.path(), 4, 1, "haar", 1);
    fs::write(&path, "haar_time_ms,12\nhaar_time_ms,fast\n").unwrap();
    match mean_time(&path, "haar") {
        Err(LutError::BadTiming { path: bad, value }) => {
            assert_eq!(bad, path);
            assert_eq!(value, "fast");
        }
        other => panic!("expected BadTiming, got {other:?}"),
    }
}

#[test]
fn test_missing_log_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(TimingMatrix::collect(dir.path(), "haar", 4..=4, 1..=1).is_err());
}

#[test]
fn test_matrix_averages_peers_and_writes_dat() {
    let dir = tempfile::tempdir().unwrap();
    for n in 4..=5 {
        for depth in 1..=2 {
            let base = f64::from(n * 100 + depth);
            write_log(dir.path(), n, depth, "haar", 0, &[("haar_time_ms", base - 1.0)]);
            write_log(dir.path(), n, depth, "haar", 1, &[("haar_time_ms", base + 1.0), ("haar_time_ms", base + 2.0)]);
        }
    }

    let matrix = TimingMatrix::collect(dir.path(), "haar", 4..=5, 1..=2).unwrap();
    // peer0 = base - 1, peer1 = base + 1.5
    assert!((matrix.get(4, 1).unwrap() - 401.25).abs() < 1e-12);
    assert!((matrix.get(5, 2).unwrap() - 502.25).abs() < 1e-12);
    assert_eq!(matrix.get(6, 1), None);

    let mut out = Vec::new();
    matrix.write_dat(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "n 4 5\n1 401 501\n2 402 502\n");

    let path = matrix.write_to(dir.path(), "haar").unwrap();
    assert_eq!(path, dir.path().join("haar.dat"));
    assert!(fs::read_to_string(path).unwrap().starts_with("n 4 5\n"));
}
