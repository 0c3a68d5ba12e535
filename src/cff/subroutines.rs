use super::index::Index;

/// A list of subroutines together with the bias their callers apply.
#[derive(Clone, Copy)]
pub struct SubroutineHandler<'a> {
    subroutines: &'a Index,
    bias: u16,
}

impl<'a> SubroutineHandler<'a> {
    pub fn new(subroutines: &'a Index) -> Self {
        Self { subroutines, bias: calc_subroutine_bias(subroutines.len()) }
    }

    /// Look up a subroutine by the biased number a charstring pushes.
    pub fn get_with_biased(&self, index: f32) -> Option<&'a [u8]> {
        self.subroutines.get(unapply_bias(index, self.bias)?)
    }
}

/// The bias for a list of `len` subroutines.
pub fn calc_subroutine_bias(len: usize) -> u16 {
    if len < 1240 {
        107
    } else if len < 33900 {
        1131
    } else {
        32768
    }
}

/// Unapply the bias from a biased subroutine index.
pub fn unapply_bias(index: f32, bias: u16) -> Option<usize> {
    if index.fract() != 0.0 || !index.is_finite() {
        return None;
    }

    let index = (index as i32).checked_add(i32::from(bias))?;
    usize::try_from(index).ok()
}
