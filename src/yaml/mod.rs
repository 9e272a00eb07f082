//! YAML fixture support for doubles.
//!
//! Lets a test suite keep stub configurations in fixture files instead of
//! inline maps:
//!
//! ```yaml
//! name: billing service
//! methods:
//!   charge: "ok"
//!   refund: null
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::MethodConfig;
use crate::double::{stub, Double};

/// A double configuration loaded from YAML.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// Human-readable name for the double.
    #[serde(default)]
    pub name: Option<String>,
    /// Method name to default return value. `null` entries record calls and
    /// answer with `null`.
    pub methods: MethodConfig,
}

/// Load a fixture from a YAML file.
pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture file: {:?}", path))?;
    let fixture: Fixture = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse fixture file: {:?}", path))?;
    Ok(fixture)
}

/// Load a fixture and build a parentless stub from it.
pub fn stub_from_file(path: &Path) -> Result<Double> {
    let fixture = load_fixture(path)?;
    Ok(stub(None, fixture.methods))
}
