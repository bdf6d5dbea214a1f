use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("order '{0}' not found")]
    OrderNotFound(String),

    #[error("order '{0}' already exists")]
    DuplicateOrder(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("element #{0} is not attached to the page")]
    NodeNotFound(usize),

    #[error("cannot move element #{0} inside its own subtree")]
    HierarchyRequest(usize),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// A stale or unknown order or element reference; the board is left as
    /// it was
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BoardError::OrderNotFound(_) | BoardError::NodeNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(BoardError::OrderNotFound("abc123".to_string()).is_not_found());
        assert!(BoardError::NodeNotFound(3).is_not_found());
        assert!(!BoardError::UnknownColumn("archived".to_string()).is_not_found());
        assert!(!BoardError::MissingField("title".to_string()).is_not_found());
    }
}
