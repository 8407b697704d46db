use crate::storage::RecordingStore;

/// Main server state, cloned into every handler.
#[derive(Clone)]
pub struct NeuroVoiceServer {
    pub config: ServerConfig,
    pub store: RecordingStore,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// JSON array file backing the recording store
    pub data_file: String,
    /// Directory uploaded audio blobs are written to
    pub uploads_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "NeuroVoice Engine".to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            data_file: "data/recordings.json".to_string(),
            uploads_dir: "public/uploads/recordings".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: defaults.name,
            bind_addr: std::env::var("NEUROVOICE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            data_file: std::env::var("NEUROVOICE_DATA_FILE").unwrap_or(defaults.data_file),
            uploads_dir: std::env::var("NEUROVOICE_UPLOADS_DIR").unwrap_or(defaults.uploads_dir),
        }
    }
}

impl NeuroVoiceServer {
    pub fn new(config: ServerConfig) -> Self {
        let store = RecordingStore::new(&config.data_file, &config.uploads_dir);
        Self { config, store }
    }
}
