use super::NDFrame;
use core::convert::Infallible;
use core::fmt::Debug;

/// the containers of a host library, known here by name only
///
/// Implementing this trait is how a library binds each forward-declared name to its
/// real definition. Hosts that lack a concept (e.g. no resampler) may bind it to
/// [`Infallible`], which makes the corresponding alternatives unconstructible.
pub trait Host: Debug + Clone + 'static {
    type DataFrame: NDFrame + Clone;
    type Series: NDFrame + Clone;
    type Index: Debug + Clone;
    type ExtensionArray: ExtensionArray;
    type ExtensionDtype: ExtensionDtype;

    type DataFrameGroupBy: Debug;
    type SeriesGroupBy: Debug;
    type Window: Debug;
    type Resampler: Debug;

    type ArrayManager: Debug;
    type BlockManager: Debug;
    type SingleArrayManager: Debug;
    type SingleBlockManager: Debug;

    type EngFormatter: Debug + Clone;
}

pub trait ExtensionDtype: Debug + Clone {
    fn name(&self) -> &str;

    /// the registry hook: build the dtype from its string alias, if this is one
    fn construct_from_string(s: &str) -> Option<Self>;
}

pub trait ExtensionArray: Debug + Clone {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ExtensionDtype for Infallible {
    fn name(&self) -> &str {
        match *self {}
    }

    fn construct_from_string(_: &str) -> Option<Self> {
        None
    }
}

impl ExtensionArray for Infallible {
    fn len(&self) -> usize {
        match *self {}
    }
}
