//! Common imports for crates building on the kernel.

pub use crate::config::{ConfigError, load_client_config, load_config};
pub use crate::contact::{PhoneError, PhoneNumber};
pub use crate::input::{Emission, Generation, PhoneInputController, SyncOutcome};
pub use crate::registry::{RegistryError, SelectionKey, SelectionRegistry};
pub use chairside_domain::config::ClientConfig;
pub use chairside_domain::phone::{
    PhoneForm, canonical_to_display, classify, extract_digits, format_display,
    is_valid_canonical, to_canonical,
};
