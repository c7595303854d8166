use serde::{Deserialize, Serialize};

/// Abstract visual state of one cell, as handed to the rendering shell.
///
/// `Exploded`, `Mine` and `IncorrectFlag` only appear once the game has
/// ended; during play a cell is one of the first four variants.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Flagged,
    Questioned,
    Exploded,
    Mine,
    IncorrectFlag,
}

impl CellView {
    /// Whether a reveal command may act on this cell.
    pub const fn is_revealable(self) -> bool {
        matches!(self, Self::Hidden | Self::Questioned)
    }

    /// Whether the cell is still visually closed.
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::Questioned)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn revealed_carries_its_adjacency_count() {
        assert_eq!(serde_json::to_value(CellView::Revealed(3)).unwrap(), json!({"Revealed": 3}));
        assert_eq!(serde_json::to_value(CellView::Hidden).unwrap(), json!("Hidden"));
    }

    #[test]
    fn only_hidden_and_questioned_are_revealable() {
        assert!(CellView::Hidden.is_revealable());
        assert!(CellView::Questioned.is_revealable());
        assert!(!CellView::Flagged.is_revealable());
        assert!(!CellView::Revealed(0).is_revealable());
        assert!(!CellView::Exploded.is_revealable());
    }
}
