//! Transfer command line construction
//!
//! The line is handed to `sh -c`, so everything except the operator's extra
//! parameters is quoted where needed. Extra parameters are trusted and
//! appended verbatim.

use crate::domain::SyncJobSpec;

/// Flags always passed to the transfer program.
///
/// `--delete` mirrors local deletions on the remote side.
/// -a: archive mode (recursive, preserve permissions, etc.)
/// -v: verbose
/// -z: compress during transfer
pub const BASE_FLAGS: &[&str] = &["--delete", "-avz"];

/// Build the full shell command line for one transfer of `spec`.
pub fn build_command_line(spec: &SyncJobSpec) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(8);
    parts.push(quote_if_needed(&spec.rsync_program));
    parts.extend(BASE_FLAGS.iter().map(|f| f.to_string()));
    if spec.dry_run {
        parts.push("--dry-run".to_string());
    }
    parts.push("-e".to_string());
    parts.push(shell_quote(&format!(
        "{} -p {}",
        spec.ssh_program, spec.remote_port
    )));
    parts.push(quote_if_needed(&spec.local_dir.to_string_lossy()));
    parts.push(quote_if_needed(&spec.remote_target()));

    if let Some(extra) = spec.extra_params.as_deref() {
        let extra = extra.trim();
        if !extra.is_empty() {
            parts.push(extra.to_string());
        }
    }

    parts.join(" ")
}

/// Single-quote `s` for a POSIX shell.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote `s` only if it contains characters the shell would interpret.
pub fn quote_if_needed(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '@' | ':' | '~' | '+' | ',' | '=')
        });
    if safe {
        s.to_string()
    } else {
        shell_quote(s)
    }
}

/// Program name of a remote shell string such as `ssh -i ~/.ssh/deploy`.
///
/// The whole string is handed to rsync's `-e`, so only its first word is an
/// executable.
pub fn remote_shell_program(ssh_program: &str) -> &str {
    ssh_program.split_whitespace().next().unwrap_or(ssh_program)
}
