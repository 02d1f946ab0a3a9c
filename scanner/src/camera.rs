//! Camera decoder process.
//!
//! The decoder (by default `zbarcam --raw --nodisplay`) prints one line per QR
//! code it recognises. A capture runs the process until the first line arrives,
//! then stops it so the camera is released while the result is handled.

use std::io;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

pub const DEFAULT_DECODER: &str = "zbarcam --raw --nodisplay";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera access denied. Allow this user to open the video device and try again.")]
    PermissionDenied,

    #[error("No camera found. Connect a camera and try again.")]
    NoCamera,

    #[error("Camera is in use by another application.")]
    CameraBusy,

    #[error("Could not access camera or scanner encountered an error: {0}")]
    Other(String),
}

impl CameraError {
    /// Sorts decoder diagnostics into the failures an operator can act on.
    pub fn classify(stderr: &str) -> Self {
        let text = stderr.to_lowercase();

        if text.contains("permission denied") || text.contains("eacces") {
            CameraError::PermissionDenied
        } else if text.contains("device or resource busy") || text.contains("ebusy") {
            CameraError::CameraBusy
        } else if text.contains("no such file or directory")
            || text.contains("no such device")
            || text.contains("enodev")
            || text.contains("no video device")
        {
            CameraError::NoCamera
        } else {
            let first = stderr
                .lines()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("decoder exited");
            CameraError::Other(first.trim().to_string())
        }
    }

    fn from_spawn(program: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            io::ErrorKind::NotFound => {
                CameraError::Other(format!("decoder `{program}` is not installed"))
            }
            _ => CameraError::Other(err.to_string()),
        }
    }
}

/// A decoder command line, split on whitespace.
#[derive(Debug, Clone)]
pub struct Decoder {
    program: String,
    args: Vec<String>,
}

impl Decoder {
    pub fn parse(command: &str) -> Result<Self, CameraError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| CameraError::Other("empty decoder command".into()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Runs the decoder until it reports one code, then kills it.
    pub async fn capture(&self) -> Result<String, CameraError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CameraError::from_spawn(&self.program, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CameraError::Other("decoder stdout unavailable".into()))?;
        let mut lines = BufReader::new(stdout).lines();

        // Drained alongside stdout so a chatty decoder cannot fill the pipe and stall.
        let stderr_task = child.stderr.take().map(|mut err| {
            tokio::spawn(async move {
                let mut text = String::new();
                let _ = err.read_to_string(&mut text).await;
                text
            })
        });

        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to stop decoder: {e}");
                    }
                    if let Some(task) = stderr_task {
                        task.abort();
                    }
                    return Ok(line.trim().to_string());
                }
                Ok(None) => break,
                Err(e) => return Err(CameraError::Other(e.to_string())),
            }
        }

        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };
        let status = child
            .wait()
            .await
            .map_err(|e| CameraError::Other(e.to_string()))?;
        log::debug!("Decoder exited with {status}: {stderr}");

        Err(CameraError::classify(&stderr))
    }
}
