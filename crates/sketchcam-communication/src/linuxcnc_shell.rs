//! LinuxCNC remote shell client.
//!
//! `linuxcncrsh` accepts one text command per line on TCP port 5007. After
//! `hello`, the session is switched to verbose mode so that every `set`
//! command is answered with a line ending in `ACK` or `NAK`, echo is turned
//! off, control is enabled, and wait mode is set to `done` so requests only
//! return once the task has executed them.

use crate::controller::MachineController;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sketchcam_core::{Axis, ControllerError, MachineMode, MachineState};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Connection settings for a `linuxcncrsh` server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub host: String,
    pub port: u16,
    /// Password for `hello`
    pub hello_password: String,
    /// Password for `set enable`
    pub enable_password: String,
    pub client_name: String,
    /// Per-request reply timeout
    pub timeout_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5007,
            hello_password: "EMC".to_string(),
            enable_password: "EMCTOO".to_string(),
            client_name: "sketchcam".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl ShellConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

pub struct LinuxCncShell {
    config: ShellConfig,
    connection: Option<Connection>,
}

impl LinuxCncShell {
    /// Connects and runs the session handshake.
    pub async fn connect(config: ShellConfig) -> Result<Self, ControllerError> {
        let address = config.address();
        tracing::debug!("Connecting to linuxcncrsh at {}", address);

        let stream = tokio::time::timeout(config.timeout(), TcpStream::connect(&address))
            .await
            .map_err(|_| ControllerError::Timeout {
                timeout_ms: config.timeout_ms,
            })??;
        let (read_half, write_half) = stream.into_split();

        let mut shell = Self {
            config,
            connection: Some(Connection {
                reader: BufReader::new(read_half),
                writer: write_half,
            }),
        };
        shell.handshake().await?;
        tracing::info!("Connected to linuxcncrsh at {}", address);
        Ok(shell)
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    async fn handshake(&mut self) -> Result<(), ControllerError> {
        let hello = format!(
            "hello {} {} 1.0",
            self.config.hello_password, self.config.client_name
        );
        let reply = self.request(&hello).await?;
        let upper = reply.to_uppercase();
        if upper.starts_with("HELLO NAK") {
            return Err(ControllerError::CommandRejected {
                reason: "hello password refused".to_string(),
            });
        }
        if !upper.starts_with("HELLO ACK") {
            return Err(ControllerError::UnexpectedReply { reply });
        }

        self.set("verbose on").await?;
        self.set("echo off").await?;
        let enable = format!("enable {}", self.config.enable_password);
        self.set(&enable).await?;
        self.set("wait done").await
    }

    /// Sends one command line and returns the first reply line that is not
    /// an echo of it.
    async fn request(&mut self, command: &str) -> Result<String, ControllerError> {
        let timeout = self.config.timeout();
        let timeout_ms = self.config.timeout_ms;
        let connection = self
            .connection
            .as_mut()
            .ok_or(ControllerError::NotConnected)?;

        tracing::trace!("linuxcncrsh <- {}", command);
        connection
            .writer
            .write_all(format!("{}\r\n", command).as_bytes())
            .await?;
        connection.writer.flush().await?;

        let outcome =
            tokio::time::timeout(timeout, read_reply(&mut connection.reader, command)).await;
        let reply = match outcome {
            Ok(reply) => reply?,
            Err(_) => {
                // A late reply would be read as the answer to the next command.
                tracing::warn!("linuxcncrsh timed out on '{}', dropping connection", command);
                self.connection = None;
                return Err(ControllerError::Timeout { timeout_ms });
            }
        };
        tracing::trace!("linuxcncrsh -> {}", reply);
        Ok(reply)
    }

    async fn set(&mut self, args: &str) -> Result<(), ControllerError> {
        let command = format!("set {}", args);
        let reply = self.request(&command).await?;
        let upper = reply.to_uppercase();
        if upper.ends_with("NAK") {
            Err(ControllerError::CommandRejected {
                reason: format!("'{}' answered {}", command, reply),
            })
        } else if upper.ends_with("ACK") {
            Ok(())
        } else {
            Err(ControllerError::UnexpectedReply { reply })
        }
    }

    /// Returns the value words of a `get` reply, e.g. `ON` for `MACHINE ON`.
    async fn get(&mut self, what: &str) -> Result<String, ControllerError> {
        let reply = self.request(&format!("get {}", what)).await?;
        let upper = reply.to_uppercase();
        if upper.ends_with("NAK") {
            return Err(ControllerError::CommandRejected {
                reason: format!("'get {}' answered {}", what, reply),
            });
        }
        match upper.split_once(' ') {
            Some((key, value)) if key.eq_ignore_ascii_case(what) => Ok(value.trim().to_string()),
            _ => Err(ControllerError::UnexpectedReply { reply }),
        }
    }
}

async fn read_reply(
    reader: &mut BufReader<OwnedReadHalf>,
    command: &str,
) -> Result<String, ControllerError> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(ControllerError::Io {
                reason: "connection closed by controller".to_string(),
            });
        }
        let reply = line.trim();
        if reply.is_empty() || reply.eq_ignore_ascii_case(command) {
            continue;
        }
        return Ok(reply.to_string());
    }
}

#[async_trait]
impl MachineController for LinuxCncShell {
    fn name(&self) -> &str {
        "linuxcncrsh"
    }

    async fn set_state(&mut self, state: MachineState) -> Result<(), ControllerError> {
        let args = match state {
            MachineState::Estop => "estop on",
            MachineState::EstopReset => "estop off",
            MachineState::On => "machine on",
            MachineState::Off => "machine off",
            MachineState::Unknown => {
                return Err(ControllerError::CommandRejected {
                    reason: "cannot request UNKNOWN state".to_string(),
                })
            }
        };
        self.set(args).await
    }

    async fn set_mode(&mut self, mode: MachineMode) -> Result<(), ControllerError> {
        self.set(&format!("mode {}", mode)).await
    }

    async fn program_open(&mut self, path: &Path) -> Result<(), ControllerError> {
        self.set(&format!("open {}", path.display())).await
    }

    async fn run_from(&mut self, line: u32) -> Result<(), ControllerError> {
        self.set(&format!("run {}", line)).await
    }

    async fn wait_complete(&mut self) -> Result<(), ControllerError> {
        self.set("wait_complete").await
    }

    async fn jog_continuous(
        &mut self,
        axis: Axis,
        velocity: f64,
    ) -> Result<(), ControllerError> {
        self.set(&format!("jog {} {:.2}", axis.index(), velocity))
            .await
    }

    async fn query_state(&mut self) -> Result<MachineState, ControllerError> {
        if self.get("estop").await? == "ON" {
            return Ok(MachineState::Estop);
        }
        let state = match self.get("machine").await?.as_str() {
            "ON" => MachineState::On,
            "OFF" => MachineState::EstopReset,
            other => {
                tracing::warn!("Unrecognised machine state '{}'", other);
                MachineState::Unknown
            }
        };
        Ok(state)
    }

    async fn disconnect(&mut self) -> Result<(), ControllerError> {
        if let Some(mut connection) = self.connection.take() {
            connection.writer.write_all(b"quit\r\n").await?;
            connection.writer.shutdown().await?;
            tracing::debug!("Disconnected from linuxcncrsh");
        }
        Ok(())
    }
}
