//! Scripted board sessions.
//!
//! A script seeds the board with pre-existing orders and then plays a list
//! of user interactions against it. Each interaction expands into the page
//! events a browser would fire for it.
//!
//! ```yaml
//! orders:
//!   - { id: abc123, title: Table 4, table: "2", column: preparing }
//! steps:
//!   - action: add
//!     title: Table 7
//!     table: "4"
//!   - action: move
//!     order: Table 7
//!     to: served
//!   - action: delete
//!     order: abc123
//! ```

use std::fs;
use std::path::Path;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::controller::{BoardEvent, HandleResult, OrderBoard};
use crate::error::{BoardError, Result};
use crate::order::{Order, OrderId};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// An order present on the page before the session starts
#[derive(Debug, Clone, Deserialize)]
pub struct SeedOrder {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub table: String,
    pub column: String,
}

/// One user interaction.
///
/// `order` fields accept either an order id or an exact title.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Open the add overlay, fill it in, submit
    Add { title: String, table: String },
    /// Drag a card onto another column
    Move { order: String, to: String },
    /// Open an order for editing, change fields, submit
    Edit {
        order: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        table: Option<String>,
        #[serde(default)]
        column: Option<String>,
    },
    /// Open an order for editing and delete it
    Delete { order: String },
    /// Open and close the help overlay
    Help,
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Add { .. } => "add",
            Step::Move { .. } => "move",
            Step::Edit { .. } => "edit",
            Step::Delete { .. } => "delete",
            Step::Help => "help",
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub result: HandleResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BoardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read script at {}: {}", path.display(), e),
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML (or JSON) script
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Seed the board, then run every step.
    ///
    /// Seeding errors abort; step errors are recorded and the run continues.
    pub fn run(&self, board: &mut OrderBoard) -> Result<Vec<StepReport>> {
        for seed in &self.orders {
            board.seed(Order {
                id: seed
                    .id
                    .as_deref()
                    .map(OrderId::from)
                    .unwrap_or_else(OrderId::generate),
                title: seed.title.clone(),
                table: seed.table.clone(),
                column: seed.column.clone(),
                created: Timestamp::now(),
            })?;
        }

        let reports = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (result, error) = match run_step(board, step) {
                    Ok(result) => (result, None),
                    Err(e) => (HandleResult::Ignored, Some(e.to_string())),
                };
                StepReport {
                    step: i + 1,
                    action: step.action(),
                    result,
                    error,
                }
            })
            .collect();
        Ok(reports)
    }
}

/// Find an order by id, falling back to the first card with that title
fn resolve_order(board: &OrderBoard, reference: &str) -> Result<OrderId> {
    let id = OrderId::from(reference);
    if board.store().contains(&id) {
        return Ok(id);
    }

    board
        .config()
        .columns
        .iter()
        .flat_map(|column| board.cards_in(column).unwrap_or_default())
        .find(|id| {
            board
                .store()
                .get(id)
                .is_ok_and(|order| order.title == reference)
        })
        .ok_or_else(|| BoardError::OrderNotFound(reference.to_string()))
}

fn run_step(board: &mut OrderBoard, step: &Step) -> Result<HandleResult> {
    match step {
        Step::Add { title, table } => {
            let add = board.handles().add;
            board.dispatch(BoardEvent::AddOpen)?;
            board.document_mut().set_value(add.title, title)?;
            board.document_mut().set_value(add.table, table)?;
            let result = board.dispatch(BoardEvent::AddSubmit);
            if result.is_err() {
                board.dispatch(BoardEvent::AddCancel)?;
            }
            result
        }
        Step::Move { order, to } => {
            let id = resolve_order(board, order)?;
            let card = board.card(&id)?;
            let target = board.handles().area(to)?;
            board.dispatch(BoardEvent::DragStart { target: card })?;
            board.dispatch(BoardEvent::DragOver { target, path: None })?;
            let result = board.dispatch(BoardEvent::Drop { target })?;
            board.dispatch(BoardEvent::DragEnd { target: card })?;
            Ok(result)
        }
        Step::Edit {
            order,
            title,
            table,
            column,
        } => {
            open_edit(board, order)?;
            let edit = board.handles().edit;
            let fields = [(edit.title, title), (edit.table, table), (edit.column, column)];
            for (field, value) in fields {
                if let Some(value) = value {
                    board.document_mut().set_value(field, value)?;
                }
            }
            let result = board.dispatch(BoardEvent::EditSubmit);
            if result.is_err() {
                board.dispatch(BoardEvent::EditCancel)?;
            }
            result
        }
        Step::Delete { order } => {
            open_edit(board, order)?;
            board.dispatch(BoardEvent::Delete)
        }
        Step::Help => {
            board.dispatch(BoardEvent::HelpOpen)?;
            board.dispatch(BoardEvent::HelpCancel)
        }
    }
}

fn open_edit(board: &mut OrderBoard, reference: &str) -> Result<()> {
    let id = resolve_order(board, reference)?;
    let card = board.card(&id)?;
    board.dispatch(BoardEvent::GridClick { target: card })?;
    Ok(())
}
