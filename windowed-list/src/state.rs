/// A lightweight snapshot of a list's viewport.
///
/// Useful for restoring scroll position when a screen is re-entered without coupling the list
/// to any UI framework. With `feature = "serde"`, this type implements
/// `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub container_height: f64,
}
