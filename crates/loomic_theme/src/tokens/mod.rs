//! Design tokens for theming
//!
//! - [`Hsl`]: the triple every palette entry and derived token is made of
//! - [`ColorToken`]: names written into style scopes
//! - [`DerivedTokenSet`]: the computed tokens for one (theme, scheme) pair

mod color;
mod hsl;

pub use color::*;
pub use hsl::*;
