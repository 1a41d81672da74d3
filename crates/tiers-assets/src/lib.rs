// Asset collaborators: tier icon store, player skin cache

pub mod icons;
pub mod skins;

pub use icons::{DEFAULT_SITE_URL, IconStore};
pub use skins::{DEFAULT_HEAD_SIZE, DEFAULT_SKIN_URL, SkinCache};
