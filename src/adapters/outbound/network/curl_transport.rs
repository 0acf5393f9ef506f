use crate::ports::outbound::{FetchCondition, FetchRequest, Transport, TransportError};
use std::ffi::OsString;
use std::process::{Command, Stdio};

const CURL: &str = "/usr/bin/curl";

/// CurlTransport adapter: downloads by running curl
///
/// curl writes the HTTP status to stdout (`-w %{http_code}`), which is how
/// failures of conditional and resumed transfers are classified. Its stderr
/// is left attached to the terminal so the progress meter stays visible.
pub struct CurlTransport {
    program: String,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self {
            program: CURL.to_string(),
        }
    }

    /// Uses another curl binary; mainly for tests.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds curl's argument list for a request.
pub fn curl_arguments(request: &FetchRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        if request.show_progress { "-fL" } else { "-sfL" }.into(),
        "--create-dirs".into(),
        "-o".into(),
        request.destination.clone().into_os_string(),
        "-w".into(),
        "%{http_code}".into(),
    ];
    // Some servers compress responses that were not asked for; requesting
    // it explicitly lets curl decode them. `.gz` files must stay as-is.
    if request.allow_compressed {
        args.push("--compressed".into());
    }
    match request.condition {
        FetchCondition::Unconditional => {}
        FetchCondition::IfNewerThanLocal => {
            args.push("-z".into());
            args.push(request.destination.clone().into_os_string());
        }
        FetchCondition::Resume => {
            let mut unless_modified = OsString::from("-");
            unless_modified.push(request.destination.as_os_str());
            args.push("-z".into());
            args.push(unless_modified);
            args.push("-C".into());
            args.push("-".into());
        }
    }
    args.push(request.url.clone().into());
    args
}

/// The status curl printed, if it printed one.
fn parse_http_status(stdout: &[u8]) -> Option<u16> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl Transport for CurlTransport {
    fn fetch(&self, request: &FetchRequest) -> Result<(), TransportError> {
        let output = Command::new(&self.program)
            .args(curl_arguments(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| TransportError::new(None, format!("Failed to run {}: {}", self.program, e)))?;

        if output.status.success() {
            return Ok(());
        }

        let status = parse_http_status(&output.stdout).filter(|status| *status != 0);
        let message = match (status, output.status.code()) {
            (Some(status), _) => format!("HTTP status {}", status),
            (None, Some(code)) => format!("curl exited with code {}", code),
            (None, None) => "curl was terminated by a signal".to_string(),
        };
        Err(TransportError::new(status, message))
    }
}
