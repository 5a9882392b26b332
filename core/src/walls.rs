use bitflags::bitflags;

bitflags! {
    /// Per-cell wall mask. Only the four low bits are meaningful.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const UP = 0b0001;
        const RIGHT = 0b0010;
        const DOWN = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::empty()
    }
}
