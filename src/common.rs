pub(crate) mod concurrent;
pub(crate) mod error;
pub(crate) mod time;

#[cfg(feature = "logging")]
pub(crate) fn log_panic(
    payload: &(dyn std::any::Any + Send + 'static),
    cache_name: Option<&str>,
    action: &str,
) {
    // Try to downcast the payload into &str or String.
    let message: Option<std::borrow::Cow<'_, str>> =
        (payload.downcast_ref::<&str>().map(|s| (*s).into()))
            .or_else(|| payload.downcast_ref::<String>().map(Into::into));

    let cn = cache_name
        .map(|name| format!("[{name}] "))
        .unwrap_or_default();

    if let Some(m) = message {
        log::error!("{cn}{action} because it panicked at '{m}'");
    } else {
        log::error!("{cn}{action} because it panicked");
    }
}
