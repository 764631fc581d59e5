use bitflags::bitflags;

bitflags! {
    /// Work a widget owes its host after a state change.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Invalidation: u8 {
        const NEEDS_MEASURE = 1 << 0;
        const NEEDS_LAYOUT  = 1 << 1;
        const NEEDS_DRAW    = 1 << 2;
    }
}

impl Invalidation {
    /// Everything; a freshly constructed widget is in this state.
    pub fn full() -> Self {
        Self::NEEDS_MEASURE | Self::NEEDS_LAYOUT | Self::NEEDS_DRAW
    }
}
