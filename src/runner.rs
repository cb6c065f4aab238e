use std::io;
use std::process::Command;

/// Captured result of a finished subprocess.
pub struct Capture {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run a command and capture stdout/stderr.
///
/// An `Err` here means the process could not be started at all; a non-zero
/// exit comes back as a `Capture` with `success == false` so callers can
/// classify the stderr themselves.
pub fn run_capture(cmd: &str, args: &[&str]) -> io::Result<Capture> {
    log::debug!("running: {} {}", cmd, args.join(" "));
    let output = Command::new(cmd).args(args).output()?;

    Ok(Capture {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_on_success() {
        let capture = run_capture("echo", &["hello"]).expect("spawn echo");
        assert!(capture.success);
        assert_eq!(capture.stdout, "hello");
    }

    #[test]
    fn reports_nonzero_exit_without_erroring() {
        let capture = run_capture("false", &[]).expect("spawn false");
        assert!(!capture.success);
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        assert!(run_capture("definitely-not-a-real-binary", &[]).is_err());
    }
}
