use embus_driver::time::Duration;

/// Driver configuration
///
/// The defaults cover the worst-case write-cycle window of comparable serial
/// EEPROMs; tighten them when the surrounding task cannot afford the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Total transmission attempts per message before the driver gives up
    /// with `DeviceBusy`. One attempt is always made; `0` behaves as `1`.
    pub max_retries: u8,
    /// Fixed delay between attempts.
    pub retry_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_backoff: Duration::from_millis(1),
        }
    }
}
