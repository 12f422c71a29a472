/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! JSON document store: one pretty-printed workflow record per file,
//! named by workflow id, under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::warn;
use uuid::Uuid;

use flow_graph::snapshot::PersistedWorkflow;

use crate::services::{StoreError, WorkflowStore, WorkflowSummary};

pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `data_dir`.
    pub fn open(data_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&data_dir).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.data_dir.join(format!("{id}.json"))
    }
}

impl WorkflowStore for JsonFileStore {
    fn list(&self) -> Result<Vec<WorkflowSummary>, StoreError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|e| StoreError::Io(e.to_string()))?;
        let mut summaries = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("skipping unreadable workflow file {}: {e}", path.display());
                    continue;
                }
            };
            let record: PersistedWorkflow = match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!("skipping malformed workflow file {}: {e}", path.display());
                    continue;
                }
            };
            let Ok(id) = Uuid::parse_str(&record.id) else {
                warn!("skipping workflow file with non-uuid id {}", path.display());
                continue;
            };
            summaries.push(WorkflowSummary {
                id,
                name: record.name,
                status: record.status,
                updated_at: record.updated_at,
            });
        }
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    fn load(&self, id: Uuid) -> Result<PersistedWorkflow, StoreError> {
        let raw = match fs::read_to_string(self.path_for(id)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        serde_json::from_str(&raw).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn save(&self, workflow: &PersistedWorkflow) -> Result<(), StoreError> {
        let id = Uuid::parse_str(&workflow.id)
            .map_err(|_| StoreError::Codec(format!("workflow id '{}' is not a uuid", workflow.id)))?;
        let raw = serde_json::to_string_pretty(workflow)
            .map_err(|e| StoreError::Codec(e.to_string()))?;
        fs::write(self.path_for(id), raw).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}
