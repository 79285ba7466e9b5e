use thiserror::Error;

use crate::prelude::{Constellation, Observable, SV};

/// Conversion related errors.
///
/// [Error::UnknownCode] and [Error::EmptyInput] are recoverable: the
/// file level conversion counts them and moves on. The structural
/// variants mean header and record disagree and are always fatal for
/// the call that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown observation code \"{0}\"")]
    UnknownCode(String),
    #[error("no satellites to convert")]
    EmptyInput,
    #[error("{sv}: header declares {expected} observables, record holds {found}")]
    StructuralMismatch {
        sv: SV,
        expected: usize,
        found: usize,
    },
    #[error("{0}: observable {1} is not declared in header")]
    UndeclaredObservable(SV, Observable),
    #[error("header does not describe any {0} observable")]
    MissingSystemObservables(Constellation),
    #[error("observable parsing error")]
    ObservableParsing(#[from] crate::observable::ParsingError),
    #[error("unknown marker type \"{0}\"")]
    MarkerTypeParsing(String),
}

impl Error {
    /// True for errors the file level conversion may skip over.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownCode(_) | Self::EmptyInput)
    }
}
