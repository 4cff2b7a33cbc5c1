use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::core::ScenarioInput;

/// Persistence collaborator: the scenario set never names a storage
/// mechanism, it only hands over and receives plain input lists.
pub trait ScenarioStore {
    fn load(&self) -> io::Result<Vec<ScenarioInput>>;
    fn save(&self, inputs: &[ScenarioInput]) -> io::Result<()>;
}

/// JSON file holding the serialized inputs, one array of camelCase objects.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScenarioStore for JsonFileStore {
    fn load(&self) -> io::Result<Vec<ScenarioInput>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        serde_json::from_str(&raw).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn save(&self, inputs: &[ScenarioInput]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(inputs)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, raw)
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inputs: Mutex<Vec<ScenarioInput>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for MemoryStore {
    fn load(&self) -> io::Result<Vec<ScenarioInput>> {
        Ok(self.inputs.lock().expect("memory store lock poisoned").clone())
    }

    fn save(&self, inputs: &[ScenarioInput]) -> io::Result<()> {
        *self.inputs.lock().expect("memory store lock poisoned") = inputs.to_vec();
        Ok(())
    }
}
