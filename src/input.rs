//! Reading the target from piped input.

#[cfg(unix)]
use std::fs::Metadata;
use std::io::{self, BufRead};

pub const USAGE: &str = "Usage: ssl-expiry <targetURL>";
pub const READ_ERROR: &str = "Error reading input.";

/// Whether stdin should be read instead of the command line.
///
/// Pipes and redirected files count as input. Character devices, i.e. a
/// terminal or `/dev/null`, do not, so the argument is used for those.
#[cfg(unix)]
pub fn stdin_has_data() -> bool {
    stdin_metadata()
        .map(|metadata| is_data_source(&metadata))
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn stdin_has_data() -> bool {
    use std::io::IsTerminal;

    !io::stdin().is_terminal()
}

#[cfg(unix)]
fn stdin_metadata() -> io::Result<Metadata> {
    use std::fs::File;
    use std::os::fd::AsFd;

    let fd = io::stdin().as_fd().try_clone_to_owned()?;
    File::from(fd).metadata()
}

#[cfg(unix)]
fn is_data_source(metadata: &Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;

    !metadata.file_type().is_char_device()
}

/// Reads the first line from `reader` with its line terminator removed.
///
/// Returns `None` when the reader is at EOF or fails before a line arrives.
pub fn read_target_line<R: BufRead>(mut reader: R) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let trimmed = line.strip_suffix('\n').unwrap_or(&line);
            let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
            Some(trimmed.to_string())
        }
    }
}
