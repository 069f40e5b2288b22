//! barcodekit Core Types and Definitions
//!
//! This crate provides the foundational types shared by the barcodekit
//! layout and drawing engine. It includes:
//!
//! - **Colors**: Color handling with CSS color and packed RGB support ([`color::Color`])
//! - **Geometry**: Integer pixel geometry ([`geometry`] module)
//! - **Draw**: Raster surfaces, text rasterization and labels ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
