use std::process::{Command, Stdio};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use super::buffer::GrowableBuffer;

/// Runs `argv` to completion and returns everything it wrote to stdout.
///
/// Blocks until the child exits; there is no timeout. A missing program,
/// a failed read, or a non-zero exit status is an error.
pub fn capture(argv: &[String]) -> Result<GrowableBuffer> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| eyre!("empty command line"))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .wrap_err_with(|| format!("failed to spawn `{program}`"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| eyre!("`{program}` has no stdout pipe"))?;
    let captured = GrowableBuffer::read_from(stdout);
    let status = child
        .wait()
        .wrap_err_with(|| format!("failed to wait for `{program}`"))?;

    let output = captured.wrap_err_with(|| format!("failed to capture `{program}` output"))?;
    if !status.success() {
        bail!("`{program}` exited with {status}");
    }
    tracing::trace!(program = %program, bytes = output.len(), "captured command output");
    Ok(output)
}
