//! Resource providers and the provider-backed image resolver.
//!
//! - [`FilesystemResourceProvider`]: loads embeds relative to a document directory
//! - [`ProviderImageResolver`]: turns an embed reference into sized image bytes

mod filesystem;
mod image_resolver;

pub use filesystem::FilesystemResourceProvider;
pub use image_resolver::{ProviderImageResolver, decode_reference};
