use anyhow::Result;

/// Runtime used for the work that has to finish before the window opens, like reading the
/// project list. The gui brings its own runtime afterwards.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
