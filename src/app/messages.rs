/// Messages from background tasks to the main UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundMessage {
    /// Raw completion text
    CompletionReady(String),
    /// Short description of why the request failed
    CompletionFailed(String),
    /// A background task crashed
    Error(String),
}
