//! Child process execution

use crate::{CommandLine, Error, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// Captured result of a finished compiler process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Non-empty lines written to standard output, in order
    pub stdout: Vec<String>,
    /// Non-empty lines written to standard error, in order
    pub stderr: Vec<String>,
    /// Exit code, or -1 when the process was terminated by a signal
    pub exit_code: i32,
}

/// Launches a resolved compiler command and waits for it to exit.
pub trait ProcessRunner {
    fn run(&self, command: &CommandLine, working_dir: &Path) -> Result<ProcessOutput>;
}

/// Runs the command as a real child process.
///
/// Both output streams are drained on their own threads while the calling
/// thread waits for exit, so a chatty compiler never blocks on a full pipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildProcess;

impl ProcessRunner for ChildProcess {
    fn run(&self, command: &CommandLine, working_dir: &Path) -> Result<ProcessOutput> {
        let spawn_error = |source| Error::Spawn {
            executable: command.executable().to_path_buf(),
            source,
        };

        let mut child = Command::new(program_path(command.executable(), working_dir))
            .args(command.args())
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // Both handles are present because both streams were piped above
        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(spawn_error(std::io::Error::other("output streams not captured")));
        };

        let (status, stdout, stderr) = thread::scope(|scope| {
            let stdout = scope.spawn(move || read_lines(stdout));
            let stderr = scope.spawn(move || read_lines(stderr));
            let status = child.wait();
            (status, join(stdout), join(stderr))
        });

        let status = status.map_err(Error::Stream)?;
        Ok(ProcessOutput {
            stdout: stdout.map_err(Error::Stream)?,
            stderr: stderr.map_err(Error::Stream)?,
            exit_code: status.code().unwrap_or(-1),
        })
    }
}

/// Resolves a relative executable path such as `../../../DXC/dxc` against
/// the child's working directory. Bare names are left for the `PATH` lookup.
fn program_path(executable: &Path, working_dir: &Path) -> PathBuf {
    if executable.is_relative() && executable.components().count() > 1 {
        working_dir.join(executable)
    } else {
        executable.to_path_buf()
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}

/// Reads a stream to the end, one line at a time.
///
/// Lines are decoded lossily since compilers may print in the local code page.
fn read_lines<R: Read>(stream: R) -> std::io::Result<Vec<String>> {
    let mut reader = BufReader::new(stream);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_path() {
        let work = Path::new("/tools/bin");
        assert_eq!(program_path(Path::new("glslc"), work), PathBuf::from("glslc"));
        assert_eq!(
            program_path(Path::new("../../../DXC/dxc"), work),
            PathBuf::from("/tools/bin/../../../DXC/dxc")
        );
        assert_eq!(
            program_path(Path::new("/vk/bin/dxc"), work),
            PathBuf::from("/vk/bin/dxc")
        );
    }

    #[test]
    fn test_read_lines_skips_blank_lines() {
        let input: &[u8] = b"first\r\n\nsecond\n\r\nlast";
        let lines = read_lines(input).unwrap();
        assert_eq!(lines, ["first", "second", "last"]);
    }

    #[test]
    fn test_read_lines_is_lossy() {
        let input: &[u8] = b"bad \xff byte\n";
        let lines = read_lines(input).unwrap();
        assert_eq!(lines, ["bad \u{fffd} byte"]);
    }
}
