//! Entity identity

slotmap::new_key_type! {
    /// Opaque entity identity
    ///
    /// Keys carry a generation, so an identity is unique for the lifetime of
    /// the world even after the entity is destroyed.
    pub struct Entity;
}

impl Entity {
    /// Stable numeric form of the identity for logs and debugging
    pub fn id(self) -> u64 {
        slotmap::Key::data(&self).as_ffi()
    }
}
