//! Test server management.
//!
//! Spawns and manages chatrelayd instances for integration testing.

use std::process::{Child, Command, ExitStatus};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// Settings written into the test server's config file.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub identify_timeout: u64,
    pub max_line_length: usize,
    pub max_name_length: usize,
    pub outbound_queue: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            identify_timeout: 10,
            max_line_length: 4096,
            max_name_length: 32,
            outbound_queue: 256,
        }
    }
}

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Holds the config file until the server is dropped.
    _data_dir: TempDir,
}

impl TestServer {
    /// Spawn a test server with default options.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        Self::spawn_with(port, ServerOptions::default()).await
    }

    /// Spawn a test server with custom options.
    pub async fn spawn_with(port: u16, options: ServerOptions) -> anyhow::Result<Self> {
        let data_dir = tempfile::Builder::new()
            .prefix(&format!("chatrelayd-test-{port}-"))
            .tempdir()?;

        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "test.server"
anonymous_name = "anonymousClient"

[listen]
address = "127.0.0.1:{port}"

[limits]
max_line_length = {max_line_length}
max_name_length = {max_name_length}
outbound_queue = {outbound_queue}

[timeouts]
identify = {identify}
shutdown_grace = 2
"#,
            max_line_length = options.max_line_length,
            max_name_length = options.max_name_length,
            outbound_queue = options.outbound_queue,
            identify = options.identify_timeout,
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_chatrelayd"))
            .arg(&config_path)
            .env("RUST_LOG", "warn")
            .spawn()?;

        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };

        // Wait for server to start listening
        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    ///
    /// The probe connection closes without identifying, which the server
    /// handles silently.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client and identify as `name`.
    pub async fn join(&self, name: &str) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::join(&self.address(), name).await
    }

    /// Send SIGTERM and wait for the process to exit.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub async fn terminate(&mut self) -> anyhow::Result<ExitStatus> {
        let status = Command::new("kill")
            .arg("-TERM")
            .arg(self.child.id().to_string())
            .status()?;
        anyhow::ensure!(status.success(), "kill -TERM failed: {status}");

        for _ in 0..100 {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("Server did not exit within 5 seconds of SIGTERM")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
