//! # pinmap style
//!
//! Colors and stroke/fill styles shared by every vector overlay in pinmap.
//!
//! Colors are kept in the CSS form Leaflet consumes (`"coral"`, `"#ff7f50"`)
//! but are validated up front, so a typo fails when the style is built
//! rather than silently rendering black in the browser.
//!
//! ## Usage
//!
//! ```ignore
//! use pinmap_style::{Color, PathStyle};
//!
//! let style = PathStyle::circle_default()
//!     .with_fill_color(Color::parse("steelblue")?)
//!     .with_fill_opacity(0.5)?;
//! ```

mod color;
mod error;
mod path;

pub use color::Color;
pub use error::{Result, StyleError};
pub use path::PathStyle;
