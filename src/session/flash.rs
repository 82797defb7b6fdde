//! One-shot status messages.

/// Error and success messages shown on the next rendered page.
///
/// Each slot holds at most one message; setting it again replaces the
/// previous one. Rendering a page takes both slots, leaving them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Take both messages, clearing the slots.
    pub fn take(&mut self) -> Flash {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let mut flash = Flash::default();
        flash.set_error("bad");
        flash.set_success("good");

        let taken = flash.take();
        assert_eq!(taken.error.as_deref(), Some("bad"));
        assert_eq!(taken.success.as_deref(), Some("good"));
        assert_eq!(flash, Flash::default());
        assert_eq!(flash.take(), Flash::default());
    }

    #[test]
    fn test_set_replaces() {
        let mut flash = Flash::default();
        flash.set_success("first");
        flash.set_success("second");
        assert_eq!(flash.success.as_deref(), Some("second"));
        assert!(flash.error.is_none());
    }
}
