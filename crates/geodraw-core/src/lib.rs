//! Geodraw Core Types and Definitions
//!
//! This crate provides the foundational types and definitions for geodraw
//! map drawing surfaces. It includes:
//!
//! - **Identifiers**: Efficient string-interned feature identifiers ([`identifier::FeatureId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: GeoJSON-shaped geometric types ([`geometry`] module)
//! - **Features**: Feature records, roles, and change batches ([`feature`] module)
//! - **Styles**: Visual style definitions and partial overrides ([`style`] module)
//! - **Icons**: Point marker icon synthesis ([`icon`] module)

pub mod color;
pub mod feature;
pub mod geometry;
pub mod icon;
pub mod identifier;
pub mod style;
