//! Reading map inputs and writing rendered maps

pub mod html;
mod locations;

pub use html::{render_html, save_html, write_html};
pub use locations::{Location, LocationTable};
