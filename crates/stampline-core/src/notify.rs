//! Transient user notices ("No active file", "Link added", ...).

/// Whatever the host uses to show a short message to the user.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}
