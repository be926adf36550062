//! Software copies of the multi-field control registers.

/// Last values written to registers that are updated field by field.
///
/// Every mutation of a field must be followed by a write of the whole register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ShadowRegisters {
    /// Layers and scan direction.
    pub dpcr: u8,
    /// Text mode, cursor and write direction.
    pub mwcr0: u8,
    /// Font source and coding.
    pub fncr0: u8,
    /// Alignment, transparency, rotation and scale of fonts.
    pub fncr1: u8,
    /// Font width and inter-character spacing.
    pub fwtset: u8,
    /// Scroll mode and layer effect.
    pub ltpr0: u8,
    /// Interrupt enables.
    pub intc1: u8,
}

/// A setting applied to exactly one upcoming operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum OneShot<T> {
    #[default]
    Idle,
    Pending(T),
    Applied,
}

impl<T: Copy> OneShot<T> {
    pub fn arm(&mut self, value: T) {
        *self = OneShot::Pending(value);
    }

    pub fn clear(&mut self) {
        *self = OneShot::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OneShot::Pending(_))
    }

    /// Hand out the pending value once.
    pub fn take(&mut self) -> Option<T> {
        match *self {
            OneShot::Pending(value) => {
                *self = OneShot::Applied;
                Some(value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_is_consumed_once() {
        let mut shot = OneShot::default();
        assert_eq!(shot.take(), None::<u8>);
        shot.arm(7);
        assert!(shot.is_pending());
        assert_eq!(shot.take(), Some(7));
        assert_eq!(shot, OneShot::Applied);
        assert_eq!(shot.take(), None);
        shot.arm(9);
        shot.clear();
        assert_eq!(shot, OneShot::Idle);
    }
}
