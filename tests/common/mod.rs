use std::sync::atomic::{AtomicU32, Ordering};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Writes `source` to a uniquely named file under the system temp directory
/// and returns its path. Each test gets its own file so parallel test
/// threads never collide.
pub fn write_source(name: &str, source: &str) -> std::path::PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!("lox-test-{name}-{id}-{}.lox", std::process::id()));
    std::fs::write(&path, source).expect("should be able to write test source to a temp file");
    path
}

/// Declares a test that runs a Lox source string through the `lox` binary
/// and checks either its stdout (`OK`) or stderr (`ERR`) against the
/// expected lines, one per `print`/error.
#[macro_export]
macro_rules! tests {
    ($name:ident : $source:expr => OK $($expected:expr),* $(,)?) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let expected: Vec<&str> = vec![$($expected),*];
            let expected = match expected.len() {
                0 => String::new(),
                _ => format!("{}\n", expected.join("\n")),
            };

            let path = $crate::common::write_source(stringify!($name), $source);

            Command::cargo_bin("lox").unwrap()
                .arg(&path)
                .assert()
                .stdout(expected)
                .success();

            let _ = std::fs::remove_file(&path);
        }
    };

    ($name:ident : $source:expr => ERR $($expected:expr),+ $(,)?) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let expected = vec![$($expected),+].join("\n");
            let expected = format!("{expected}\n");

            let path = $crate::common::write_source(stringify!($name), $source);

            Command::cargo_bin("lox").unwrap()
                .arg(&path)
                .assert()
                .stderr(expected)
                .failure();

            let _ = std::fs::remove_file(&path);
        }
    };
}
