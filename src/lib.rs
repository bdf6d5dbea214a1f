pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod order;
pub mod page;
pub mod render;
pub mod script;
pub mod state;
pub mod store;

pub use config::{Config, LegacyBehavior};
pub use controller::{BoardEvent, BoardSnapshot, ColumnSnapshot, HandleResult, OrderBoard};
pub use dom::{Document, NodeId};
pub use error::{BoardError, Result};
pub use order::{FormFields, Order, OrderId, create_order_data};
pub use page::PageHandles;
pub use script::{Script, Step, StepReport};
pub use state::{DragPhase, Overlay};
