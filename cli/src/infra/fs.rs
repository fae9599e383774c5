//! Filesystem infrastructure. Implements `AgentStore` over a directory tree:
//! `<agents_root>/<name>/{code_file,config_file}`.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{AgentStore, Payload};
use crate::domain::StudioConfig;

/// Production `AgentStore` backed by one directory per agent.
pub struct LocalAgentStore {
    root: PathBuf,
    code_file: String,
    config_file: String,
}

impl LocalAgentStore {
    #[must_use]
    pub fn new(root: PathBuf, code_file: &str, config_file: &str) -> Self {
        Self {
            root,
            code_file: code_file.to_string(),
            config_file: config_file.to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(config.agents_root(), &config.code_file, &config.config_file)
    }

    fn payload_path(&self, name: &str, payload: Payload) -> PathBuf {
        let file = match payload {
            Payload::Code => &self.code_file,
            Payload::Config => &self.config_file,
        };
        self.agent_path(name).join(file)
    }
}

impl AgentStore for LocalAgentStore {
    fn agent_names(&self) -> Result<Vec<String>> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("creating agents directory {}", self.root.display()))?;
        let entries = std::fs::read_dir(&self.root)
            .with_context(|| format!("reading agents directory {}", self.root.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("reading agents directory {}", self.root.display()))?;
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if !is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::debug!(name = ?raw, "skipping non-UTF-8 agent directory"),
            }
        }
        Ok(names)
    }

    fn agent_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn agent_exists(&self, name: &str) -> Result<bool> {
        let path = self.agent_path(name);
        match std::fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("inspecting {}", path.display())),
        }
    }

    fn read_payload(&self, name: &str, payload: Payload) -> Result<Option<String>> {
        let path = self.payload_path(name, payload);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn create_agent_dir(&self, name: &str) -> Result<()> {
        let dir = self.agent_path(name);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating directory {}", dir.display()))
    }

    fn write_payload(&self, name: &str, payload: Payload, content: &str) -> Result<()> {
        let path = self.payload_path(name, payload);
        tracing::debug!(path = %path.display(), bytes = content.len(), "writing agent file");
        std::fs::write(&path, content).with_context(|| format!("writing file {}", path.display()))
    }

    fn remove_agent(&self, name: &str) -> Result<()> {
        let dir = self.agent_path(name);
        match std::fs::remove_dir_all(&dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing directory {}", dir.display())),
        }
    }
}
