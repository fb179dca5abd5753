//! Object model mirroring the OPF, NCX and OCF container structures

mod container;
mod guide;
mod item;
mod manifest;
mod metadata;
mod nav_point;
mod ncx;
mod spine;

pub use container::{Container, RootFile};
pub use guide::{Guide, Reference};
pub use item::{DcItem, Item};
pub use manifest::{Manifest, ManifestItem};
pub use metadata::{Metadata, ROLE_AUTHOR, ROLE_TRANSLATOR};
pub use nav_point::{child_nav_id, NavPoint};
pub use ncx::Ncx;
pub use spine::{ItemRef, Spine};
