use arpdns_application::ports::NeighborProbe;
use arpdns_domain::ResolutionError;
use async_trait::async_trait;
use std::net::Ipv6Addr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// IPv6 neighbor solicitation through an external prober.
///
/// Runs `<command> -q <address> <interface>`; stdout with the trailing
/// newline removed is the hardware address.
pub struct NdiscProbe {
    command: String,
    timeout: Duration,
}

impl NdiscProbe {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

#[async_trait]
impl NeighborProbe for NdiscProbe {
    async fn probe(&self, target: Ipv6Addr, interface: &str) -> Result<String, ResolutionError> {
        let no_reply = |reason: String| ResolutionError::NoReply(format!("{}: {}", target, reason));

        let child = Command::new(&self.command)
            .arg("-q")
            .arg(target.to_string())
            .arg(interface)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| no_reply(format!("{} timed out", self.command)))?
            .map_err(|e| no_reply(format!("cannot run {}: {}", self.command, e)))?;

        if !output.status.success() {
            return Err(no_reply(format!("{} exited with {}", self.command, output.status)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let hardware_address = stdout.trim_end_matches(['\n', '\r']);
        if hardware_address.is_empty() {
            return Err(no_reply(format!("{} printed nothing", self.command)));
        }

        debug!(ip = %target, mac = %hardware_address, "Neighbor probe answered");
        Ok(hardware_address.to_string())
    }
}
