//! Command execution through the host shell.

use std::io::Read;

/// What came back from running one command.
pub(crate) struct Capture {
    /// Exit status of the shell; recorded but never part of pass/fail.
    #[allow(dead_code)]
    pub(crate) status: std::process::ExitStatus,
    /// stdout and stderr, interleaved as the command produced them.
    pub(crate) output: Vec<u8>,
}

/// Run `cmd` through `shell -c`, with stdout and stderr merged into a
/// single captured stream.
///
/// The shell gets the full command string, so pipes, redirects and
/// expansions behave as they would in a terminal. stdin is closed and the
/// child waits as long as it wants.
pub(crate) fn run_shell(
    shell: &std::path::Path,
    cmd: &str,
    cwd: &std::path::Path,
) -> Result<Capture, crate::Error> {
    let (mut reader, writer) = os_pipe::pipe()
        .map_err(|e| format!("failed to create capture pipe: {e}"))?;
    let writer_clone = writer
        .try_clone()
        .map_err(|e| format!("failed to create capture pipe: {e}"))?;

    let mut command = std::process::Command::new(shell);
    command
        .arg("-c")
        .arg(cmd)
        .current_dir(cwd)
        .stdin(std::process::Stdio::null())
        .stdout(writer)
        .stderr(writer_clone);
    let mut child = command
        .spawn()
        .map_err(|e| format!("failed to run {}: {}", shell.display(), e))?;
    // The Command still holds both pipe writers; they must be closed
    // before reading or `read_to_end` never sees EOF.
    drop(command);

    let mut output = Vec::new();
    reader
        .read_to_end(&mut output)
        .map_err(|e| format!("failed to read command output: {e}"))?;
    let status = child
        .wait()
        .map_err(|e| format!("failed to wait for {}: {}", shell.display(), e))?;
    crate::debug!("{cmd:?}: {status}, {} bytes", output.len());

    Ok(Capture { status, output })
}
