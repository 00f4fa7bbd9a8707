//! Flowline Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Flowline flowchart
//! engine. It includes:
//!
//! - **Geometry**: Points, sizes and rectangles ([`geometry`] module)
//! - **Anchors**: Shape sides and connector endpoints ([`anchor`] module)
//! - **Identifiers**: String-interned shape and connection ids ([`identifier::Id`])
//! - **Colors**: CSS color parsing ([`color::Color`])
//! - **Style**: Opaque connector styling ([`style`] module)

pub mod anchor;
pub mod color;
pub mod geometry;
pub mod identifier;
pub mod style;
