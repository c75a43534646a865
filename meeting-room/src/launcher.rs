/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Out-of-process whiteboard provisioning.
//!
//! The browser automation that opens a collaboration room lives in an
//! external script. [CommandProvisioner] runs it with the display name as the
//! last argument and reads the shareable URL from the first non-empty line the
//! script prints on stdout.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use url::Url;

use crate::config::WhiteboardCommand;
use crate::error::ProviderError;
use crate::providers::SessionProvisioner;

/// Fragment marker of a live collaboration room URL.
const ROOM_FRAGMENT_MARKER: &str = "room=";

#[derive(Debug, Clone)]
pub struct CommandProvisioner {
    command: WhiteboardCommand,
}

impl CommandProvisioner {
    pub fn new(command: WhiteboardCommand) -> Self {
        Self { command }
    }

    fn parse_session_url(stdout: &str) -> Result<String, ProviderError> {
        let line = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| ProviderError::Provisioning("script printed no session URL".into()))?;

        let url = Url::parse(line)
            .map_err(|e| ProviderError::Provisioning(format!("invalid session URL '{line}': {e}")))?;

        match url.fragment() {
            Some(fragment) if fragment.contains(ROOM_FRAGMENT_MARKER) => Ok(url.to_string()),
            _ => Err(ProviderError::Provisioning(format!(
                "session URL '{line}' has no room fragment"
            ))),
        }
    }
}

#[async_trait]
impl SessionProvisioner for CommandProvisioner {
    async fn provision(&self, display_name: &str) -> Result<String, ProviderError> {
        log::info!(
            "Provisioning whiteboard session via '{}' for {display_name}",
            self.command.program
        );

        // kill_on_drop closes the headless browser if the launch future is dropped.
        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(display_name)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ProviderError::Provisioning(format!(
                    "failed to start '{}': {e}",
                    self.command.program
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::Provisioning(format!(
                "'{}' exited with {}: {}",
                self.command.program,
                output.status,
                stderr.trim()
            )));
        }

        Self::parse_session_url(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_non_empty_line() {
        let out = "\n  https://excalidraw.com/#room=abc,key  \nignored\n";
        assert_eq!(
            CommandProvisioner::parse_session_url(out).unwrap(),
            "https://excalidraw.com/#room=abc,key"
        );
    }

    #[test]
    fn rejects_url_without_room_fragment() {
        let err = CommandProvisioner::parse_session_url("https://excalidraw.com/").unwrap_err();
        assert!(matches!(err, ProviderError::Provisioning(_)));
    }

    #[test]
    fn rejects_empty_output() {
        assert!(CommandProvisioner::parse_session_url("\n\n").is_err());
        assert!(CommandProvisioner::parse_session_url("not a url").is_err());
    }
}
