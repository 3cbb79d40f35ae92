//! Annotation-intent resolution engine.
//!
//! Maps freehand client annotations drawn over a reference image to the
//! semantic region they most likely refer to, and decides whether the
//! implied edit is minor or needs review. Everything here is pure and
//! synchronous; the HTTP boundary lives in `intent-lens-api`.
//!
//! Flow for one batch: [`batch::analyze_batch`] looks up the image in the
//! [`catalog::RegionCatalog`], projects each [`annotation::Annotation`] into
//! image space, [`resolver::resolve`]s it to a region and
//! [`classifier::classify`]s the result.

pub mod annotation;
pub mod batch;
pub mod catalog;
pub mod classifier;
pub mod error;
pub mod geometry;
pub mod region;
pub mod resolver;
