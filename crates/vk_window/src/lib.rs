//! # vk_window
//!
//! Owns a single native window together with the Vulkan instance and
//! presentation surface bound to it, and translates the raw input events
//! delivered to that window into log records.
//!
//! ## Lifecycle
//!
//! - **init**: windowing backend bootstrap, window creation, Vulkan instance and
//!   surface creation, input event registration
//! - **main loop**: poll events until the window's close flag is set
//! - **cleanup**: surface, instance, window and backend released in reverse order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_window::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut context = WindowContext::with_glfw(WindowConfig::default());
//!     context.init()?;
//!     context.main_loop()?;
//!     context.cleanup()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod error;
pub mod graphics;
pub mod input;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{GraphicsInitError, WindowError, WindowResult};
pub use window::{LifecycleState, WindowContext};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PortabilityMode, VersionTriple, WindowConfig},
        error::{GraphicsInitError, WindowError, WindowResult},
        input::{InputDispatcher, KeyEvent, MouseButtonEvent, WindowEventHandler},
        window::{LifecycleState, WindowContext},
    };
}
