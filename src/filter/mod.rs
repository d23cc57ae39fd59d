//! Filter model and editor.
//!
//! - [`model`]: typed [`FilterCriteria`] with three-state optional facets
//! - [`editor`]: [`FilterEditor`], the only mutator of the criteria
//! - [`catalog`]: publisher and database option lists

pub mod catalog;
pub mod editor;
pub mod model;

pub use editor::{ChipKind, FacetValue, FilterChip, FilterEditor, OptionalFacet, RangeBound};
pub use model::{
    Facet, FilterCriteria, FilterPatch, Quartile, RangeFacet, ScoreRange, SearchField,
};
