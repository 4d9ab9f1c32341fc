use readbench::error;
use readbench::ReadBenchError;
use std::path::PathBuf;

#[test]
fn test_user_input_errors_are_classified() {
    let missing = ReadBenchError::NotFound(PathBuf::from("/nope"));
    assert!(error::is_user_input_error(&missing));
    assert_eq!(missing.to_string(), "/nope does not exist");

    let mismatch = ReadBenchError::SizeMismatch {
        path: PathBuf::from("/data/f3"),
        expected: 500,
        actual: 501,
    };
    assert!(error::is_user_input_error(&mismatch));
    assert!(mismatch.to_string().contains("/data/f3 is 501 bytes, expected 500"));
}

#[test]
fn test_read_errors_are_environment_failures() {
    let err = ReadBenchError::Read {
        path: PathBuf::from("/data/f1"),
        source: std::io::Error::new(std::io::ErrorKind::Other, "device gone"),
    };
    assert!(!error::is_user_input_error(&err));
    assert!(std::error::Error::source(&err).is_some());
    let msg = error::user_friendly_message(&err);
    assert!(msg.contains("Failed to read /data/f1: device gone"));
    assert!(msg.contains("aborted"));
}

#[test]
fn test_every_error_exits_with_one() {
    let errors = [
        ReadBenchError::NotADirectory(PathBuf::from("/etc/hosts")),
        ReadBenchError::InsufficientFiles {
            folder: PathBuf::from("/data"),
            found: 2,
            required: 6,
        },
        ReadBenchError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
    ];
    for err in &errors {
        assert_eq!(error::exit_code(err), 1);
    }
}

#[test]
fn test_insufficient_files_message_suggests_fix() {
    let err = ReadBenchError::InsufficientFiles {
        folder: PathBuf::from("/data"),
        found: 2,
        required: 6,
    };
    let msg = error::user_friendly_message(&err);
    assert!(msg.starts_with("/data must contain at least 6 identical files (found 2)"));
    assert!(msg.contains("copies of one file"));
}
