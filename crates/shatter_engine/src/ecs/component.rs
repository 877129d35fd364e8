//! Component trait

use std::fmt::Debug;

/// Marker trait for component data
///
/// Components are plain data. Reads hand out copies, so every component
/// must be cloneable.
pub trait Component: Clone + Debug + 'static {}
