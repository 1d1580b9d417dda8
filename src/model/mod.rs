//! Contract between chart-producing business logic and the rendering core.

mod command;
mod json_contract;

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::core::LogicalRect;

pub use command::{CommandKind, DrawCommand};
pub use json_contract::{COMMAND_LIST_JSON_SCHEMA_V1, CommandListJsonContractV1};

/// Pull-based chart content source.
///
/// Both queries must be side-effect free; the view may call them at every
/// repaint and never mutates the model.
pub trait ChartModel {
    /// Current draw commands in paint order.
    fn draw_commands(&self) -> Vec<DrawCommand>;

    /// Logical rectangle the commands are laid out in.
    fn logical_extent(&self) -> LogicalRect;
}

impl<M: ChartModel + ?Sized> ChartModel for RefCell<M> {
    fn draw_commands(&self) -> Vec<DrawCommand> {
        self.borrow().draw_commands()
    }

    fn logical_extent(&self) -> LogicalRect {
        self.borrow().logical_extent()
    }
}

/// Plain chart model holding a precomputed command sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandList {
    pub extent: LogicalRect,
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    #[must_use]
    pub fn new(extent: LogicalRect) -> Self {
        Self {
            extent,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandList {
    fn default() -> Self {
        Self::new(LogicalRect::unit())
    }
}

impl ChartModel for CommandList {
    fn draw_commands(&self) -> Vec<DrawCommand> {
        self.commands.clone()
    }

    fn logical_extent(&self) -> LogicalRect {
        self.extent
    }
}
