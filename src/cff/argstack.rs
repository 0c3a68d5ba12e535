use super::charstring::CharStringError;

/// The maximum number of operands allowed during parsing.
pub const MAX_OPERANDS_LEN: usize = 48;

/// An arguments stack for interpreting charstrings.
#[derive(Debug, Default)]
pub struct ArgumentsStack {
    data: Vec<f32>,
}

impl ArgumentsStack {
    /// Create a new argument stack.
    pub fn new() -> Self {
        Self { data: Vec::with_capacity(MAX_OPERANDS_LEN) }
    }

    /// The current length of the arguments stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Push a new number onto the stack.
    #[inline]
    pub fn push(&mut self, n: f32) -> Result<(), CharStringError> {
        if self.len() == MAX_OPERANDS_LEN {
            Err(CharStringError::StackOverflow)
        } else {
            self.data.push(n);
            Ok(())
        }
    }

    /// Pop a number from the stack.
    #[inline]
    pub fn pop(&mut self) -> Result<f32, CharStringError> {
        self.data.pop().ok_or(CharStringError::StackUnderflow)
    }

    /// The number at `index`, counted from the bottom of the stack.
    #[inline]
    pub fn at(&self, index: usize) -> f32 {
        self.data[index]
    }

    /// Take all numbers from the stack, bottom first.
    #[inline]
    pub fn pop_all(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.data)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits() {
        let mut stack = ArgumentsStack::new();
        assert_eq!(stack.pop(), Err(CharStringError::StackUnderflow));
        for i in 0..MAX_OPERANDS_LEN {
            stack.push(i as f32).unwrap();
        }
        assert_eq!(stack.push(0.0), Err(CharStringError::StackOverflow));
        assert_eq!(stack.pop(), Ok(47.0));
        assert_eq!(stack.at(1), 1.0);
        assert_eq!(stack.pop_all().len(), 47);
        assert!(stack.is_empty());
    }
}
