//! Reading request bodies and configuration files.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;

use crate::{FantasyError, Result};

/// Where a request body comes from: a file, or stdin when given `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl From<&Path> for InputSource {
    fn from(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }
}

/// Read the whole input into a String
pub fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
        InputSource::File(path) => Ok(fs::read_to_string(path)?),
    }
}

/// Read and decode a JSON document. Bodies that are not JSON, or not the
/// expected shape, are rejected as bad requests.
pub fn read_json<T: DeserializeOwned>(source: &InputSource) -> Result<T> {
    let raw = read_input(source)?;
    serde_json::from_str(&raw).map_err(FantasyError::InvalidRequest)
}
