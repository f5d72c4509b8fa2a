//! External watch program backend

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::ChangeSource;
use crate::buffer::ChangeBuffer;
use crate::error::WatchError;

/// Replaced by the watched directory in configured watch arguments
pub const DIR_PLACEHOLDER: &str = "{dir}";

/// How often the session checks the child and the running flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How output records are delimited and turned into buffer text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// NUL-delimited paths (`fswatch -0`), rendered as
    /// `fswatch: file <path> has changed.`
    FswatchNul,
    /// Newline-delimited lines, appended verbatim
    Lines,
}

impl RecordFormat {
    fn delimiter(self) -> u8 {
        match self {
            RecordFormat::FswatchNul => b'\0',
            RecordFormat::Lines => b'\n',
        }
    }

    fn render(self, record: &str) -> String {
        match self {
            RecordFormat::FswatchNul => format!("fswatch: file {record} has changed.\n"),
            RecordFormat::Lines => format!("{record}\n"),
        }
    }
}

/// Watch backend that runs an external program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWatch {
    program: String,
    args: Vec<String>,
    format: RecordFormat,
}

impl Default for CommandWatch {
    fn default() -> Self {
        Self::fswatch()
    }
}

impl CommandWatch {
    /// `fswatch -0 <dir>`
    pub fn fswatch() -> Self {
        Self {
            program: "fswatch".to_string(),
            args: vec!["-0".to_string(), DIR_PLACEHOLDER.to_string()],
            format: RecordFormat::FswatchNul,
        }
    }

    /// Custom program emitting one line per change. `{dir}` in `args` is
    /// replaced by the watched directory.
    pub fn custom(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            format: RecordFormat::Lines,
        }
    }

    /// Build from an argv list (program first)
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::custom(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn resolved_args(&self, local_dir: &Path) -> Vec<String> {
        let dir = local_dir.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(DIR_PLACEHOLDER, &dir))
            .collect()
    }

    fn spawn(&self, local_dir: &Path) -> Result<Child, WatchError> {
        Command::new(&self.program)
            .args(self.resolved_args(local_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| WatchError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

impl ChangeSource for CommandWatch {
    fn name(&self) -> &'static str {
        match self.format {
            RecordFormat::FswatchNul => "fswatch",
            RecordFormat::Lines => "command",
        }
    }

    fn run(
        &self,
        local_dir: &Path,
        buffer: &Arc<ChangeBuffer>,
        running: &AtomicBool,
    ) -> Result<(), WatchError> {
        let mut child = self.spawn(local_dir)?;
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(WatchError::NoStdout);
        };

        let pump = {
            let buffer = Arc::clone(buffer);
            let format = self.format;
            thread::Builder::new()
                .name("autosync-watch-pump".to_string())
                .spawn(move || pump_records(stdout, format, &buffer))
        };
        let pump = match pump {
            Ok(handle) => handle,
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(WatchError::Spawn {
                    program: self.program.clone(),
                    source,
                });
            }
        };

        loop {
            if !running.load(Ordering::SeqCst) {
                debug!(program = %self.program, "stopping watch program");
                let _ = child.kill();
                let _ = child.wait();
                // A grandchild may still hold the pipe open; don't wait on the pump
                drop(pump);
                return Ok(());
            }

            match child.try_wait() {
                Ok(Some(status)) => {
                    let _ = pump.join();
                    return Err(WatchError::Exited { status });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(WatchError::Wait(e));
                }
            }
        }
    }
}

/// Forward every record from `reader` into `buffer`. Does nothing else.
fn pump_records(reader: impl Read, format: RecordFormat, buffer: &ChangeBuffer) {
    let mut reader = BufReader::new(reader);
    let delimiter = format.delimiter();
    let mut record = Vec::new();
    loop {
        record.clear();
        match reader.read_until(delimiter, &mut record) {
            Ok(0) | Err(_) => return,
            Ok(_) => {
                if record.last() == Some(&delimiter) {
                    record.pop();
                }
                let text = String::from_utf8_lossy(&record);
                buffer.append(&format.render(&text));
            }
        }
    }
}
