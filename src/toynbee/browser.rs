use crate::error::OpenError;
use std::process::Command;

/// Opens URLs somewhere a human can look at them.
pub trait Opener {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// The program and leading arguments that open a URL on `os`, as named by
/// `std::env::consts::OS`.
/// - linux: xdg-open
/// - windows: rundll32 url.dll,FileProtocolHandler
/// - macos: open
pub fn launcher_for(os: &str) -> Result<(&'static str, &'static [&'static str]), OpenError> {
    match os {
        "linux" => Ok(("xdg-open", &[])),
        "windows" => Ok(("rundll32", &["url.dll,FileProtocolHandler"])),
        "macos" => Ok(("open", &[])),
        other => Err(OpenError::UnsupportedPlatform(other.to_string())),
    }
}

/// Launches the desktop's default browser. The launcher is started and left
/// running; its exit status is not awaited.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Opener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        let (program, args) = launcher_for(std::env::consts::OS)?;
        Command::new(program)
            .args(args)
            .arg(url)
            .spawn()
            .map_err(|source| OpenError::Launch {
                command: program.to_string(),
                source,
            })?;
        Ok(())
    }
}
