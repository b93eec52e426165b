//! Provides definitions of the declaration facts that the front end hands to
//! the cross-reference resolution engine, along with diagnostics and a
//! visitor for walking declarations.

pub mod core;
pub mod decl;
pub mod diagnostic;
pub mod json;
pub mod mention;
pub mod visitor;
