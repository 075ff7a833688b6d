//! Notifier trait - best-effort user notification

/// Desktop notification interface
///
/// Delivery is best-effort: implementations never fail, they fall back to
/// printing on standard output instead.
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    /// Show `message` with `title` to the user
    async fn notify(&self, title: &str, message: &str);
}
