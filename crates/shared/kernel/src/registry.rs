//! Type-erased registry entries for feature slices.
//!
//! A feature crate (calendars, health, ...) builds its state once at startup
//! and hands it over boxed; the API state stores the boxes keyed by concrete
//! type and handlers fetch their slice back by that type.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// State owned by one feature slice, readable from any request handler.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Downcast hook for the typed lookup in the API state.
    fn as_any(&self) -> &dyn Any;
}

/// A slice's boxed state together with the type id it is registered under.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    /// Boxes concrete slice state for registration.
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }
}
