use muletools_core::tables::ParseError;

use crate::fetch::FetchError;

/// Failures a query operation can surface: either the fetch failed or the
/// markup could not be parsed. Both propagate unchanged from the component
/// that produced them; no operation swallows a failure into an empty
/// successful result.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
