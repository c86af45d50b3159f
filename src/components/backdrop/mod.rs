//! Parameterized animated-background engine.
//!
//! One engine behind every decorated section of the page:
//! - Fixed-population particle field with randomized spawn state
//! - Optional proximity links, rebuilt from scratch each frame
//! - Pointer forces (attract/repel) and camera parallax
//! - Reflect or wrap boundary policies
//! - Cooperative `requestAnimationFrame` loop with strict
//!   attach/detach resource lifetime
//!
//! The looks that used to be separate per-section animations are named
//! presets on [`BackdropConfig`]; everything else is plain configuration.
//!
//! # Example
//!
//! ```ignore
//! use lumen_folio::components::backdrop::{BackdropConfig, ParticleBackdrop};
//!
//! view! {
//!     <section style="position: relative;">
//!         <ParticleBackdrop config=BackdropConfig::constellation() />
//!         <div class="content">"..."</div>
//!     </section>
//! }
//! ```

mod component;
pub mod config;
mod driver;
mod field;
mod lifecycle;
mod links;
mod pointer;
mod render;
mod sim;
pub mod theme;

pub use component::ParticleBackdrop;
pub use config::{BackdropConfig, BoundaryPolicy, ConfigError, ForceModel, LinkConfig};
pub use lifecycle::AttachError;
pub use theme::{BackdropPalette, Color};
