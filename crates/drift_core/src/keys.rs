//! Stable identities for host-owned objects
//!
//! Hosts mint these keys from their own slot maps; the core only compares and
//! hashes them.

use slotmap::new_key_type;

new_key_type! {
    /// A page element known to the host (a blob, a reveal target, a card)
    pub struct ElementId;

    /// A registered input listener
    pub struct ListenerId;

    /// An intersection observer created by a controller
    pub struct ObserverId;
}
