//! Form-to-QR generator core.
//!
//! A [`Record`] holds what a user typed into the contact form. From it the
//! crate derives the text embedded in a QR code ([`encode`]) and the metadata
//! shown around it ([`display`]), for one of three [`Mode`]s. Rendering the
//! code into an image lives behind the [`BarcodeRenderer`] seam in [`render`].

pub mod cli;
pub mod config;
pub mod display;
pub mod encode;
pub mod landing;
pub mod model;
pub mod render;
pub mod session;

pub use cli::{Cli, Commands, LandingCommand, RecordArgs, run};
pub use config::{AppConfig, ConfigError};
pub use display::{NamingOptions, Platform, filename, filename_with, label, label_with, platform_tags};
pub use encode::{EncodeOptions, ProfileKind, encode, encode_with};
pub use landing::{LandingContact, LandingError, LandingLink, LandingPayload};
pub use model::{ListField, Mode, Record, RecordError, ScalarField};
pub use render::{BarcodeRenderer, QrRenderer, RenderError, RenderOptions};
pub use session::{Edit, FormSession, QrView};
