use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SmilesError {
    #[error("empty SMILES string")]
    Empty,

    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { position: usize, found: char },

    #[error("unknown element '{symbol}' at position {position}")]
    UnknownElement { position: usize, symbol: String },

    #[error("unterminated bracket atom starting at position {position}")]
    UnterminatedBracket { position: usize },

    #[error("malformed bracket atom '[{content}]'")]
    MalformedBracket { content: String },

    #[error("unbalanced branch parentheses")]
    UnbalancedBranch,

    #[error("ring-closure label {label} left open")]
    OpenRingBond { label: u16 },

    #[error("invalid ring closure for label {label}")]
    InvalidRingClosure { label: u16 },

    #[error("bond symbol is not followed by an atom")]
    DanglingBond,
}
