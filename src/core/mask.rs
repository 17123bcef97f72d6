//! Binding category mask.

bitflags::bitflags! {
    /// Categories of handler bindings a machine resolves when building a
    /// bundle.
    ///
    /// The mask is fixed at machine construction. Categories left out of
    /// the mask fill their slots with no-ops when a bundle is built, even
    /// if the binding table registers handlers for them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statekit::core::BindingMask;
    ///
    /// let mask = BindingMask::NORMAL_LIFECYCLE | BindingMask::ANIM_EVENT_CALLBACKS;
    /// assert!(mask.contains(BindingMask::NORMAL_LIFECYCLE));
    /// assert!(!mask.contains(BindingMask::ANIM_LAYER_CALLBACKS));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct BindingMask: u8 {
        /// Enter/exit/update/fixed-update/late-update slots
        const NORMAL_LIFECYCLE = 1 << 0;
        /// Animation-layer enter/move/update/exit slots
        const ANIM_LAYER_CALLBACKS = 1 << 1;
        /// The five animation-event slots
        const ANIM_EVENT_CALLBACKS = 1 << 2;
    }
}

impl Default for BindingMask {
    fn default() -> Self {
        Self::NORMAL_LIFECYCLE
    }
}
