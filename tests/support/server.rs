//! A live server on an ephemeral port, backed by a throwaway directory.

use std::fs;
use std::path::{Path, PathBuf};

use schoolyard::adapter::inbound::http::server::serve_on;
use schoolyard::infrastructure::bootstrap::build_app;
use schoolyard::infrastructure::config::settings::Config;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct TestServer {
    pub base_url: String,
    pub config: Config,
    shutdown: Option<oneshot::Sender<()>>,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start with defaults pointed at a temp dir, then `adjust`.
    pub async fn start_with(adjust: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = Config::default();
        config.database.url = dir.path().join("schools.db").display().to_string();
        config.uploads.dir = dir.path().join("schoolImages");
        adjust(&mut config);

        let router = build_app(&config).expect("build app");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(serve_on(listener, router, async {
            let _ = rx.await;
        }));

        let base_url = format!("http://{addr}");
        config.client.base_url = base_url.clone();

        Self {
            base_url,
            config,
            shutdown: Some(tx),
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.uploads.dir
    }

    /// Filenames currently in the upload directory, sorted.
    pub fn stored_images(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.upload_dir()) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Write the effective config so the CLI binary can talk to this server.
    pub fn write_config(&self, dir: &Path) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, self.config.to_toml().expect("render config")).expect("write config");
        path
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Text fields of a valid registration.
pub fn valid_fields(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("address", "12 Long Road, Metro".to_string()),
        ("city", "Metro".to_string()),
        ("state", "North".to_string()),
        ("contact", "0123456789".to_string()),
        ("email_id", "office@alpha.edu".to_string()),
    ]
}

/// A minimal PNG signature followed by padding.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len.max(bytes.len()), 0);
    bytes
}
