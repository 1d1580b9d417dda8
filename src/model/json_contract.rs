use serde::{Deserialize, Serialize};

use crate::core::LogicalRect;
use crate::error::{ChartError, ChartResult};

use super::{CommandList, DrawCommand};

pub const COMMAND_LIST_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandListJsonContractV1 {
    pub schema_version: u32,
    pub extent: LogicalRect,
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = CommandListJsonContractV1 {
            schema_version: COMMAND_LIST_JSON_SCHEMA_V1,
            extent: self.extent,
            commands: self.commands.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize command list contract v1: {e}"))
        })
    }

    /// Parses either a versioned contract payload or a bare `CommandList`.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse command list json: {e}"))
        })?;

        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse command list json payload: {e}"))
            });
        }

        let payload: CommandListJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse command list json payload: {e}"))
        })?;
        if payload.schema_version != COMMAND_LIST_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported command list schema version: {}",
                payload.schema_version
            )));
        }
        Ok(Self {
            extent: payload.extent,
            commands: payload.commands,
        })
    }
}
