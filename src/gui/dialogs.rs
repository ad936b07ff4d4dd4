use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

/// Nothing is shown until the returned future is polled, so building a task out of it has no
/// side effects.
async fn show(
    level: MessageLevel,
    title: String,
    description: String,
    buttons: MessageButtons,
) -> MessageDialogResult {
    AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(buttons)
        .show()
        .await
}

pub async fn info(title: String, description: String) {
    show(MessageLevel::Info, title, description, MessageButtons::Ok).await;
}

pub async fn warning(title: String, description: String) {
    show(MessageLevel::Warning, title, description, MessageButtons::Ok).await;
}

pub async fn error(title: String, description: String) {
    show(MessageLevel::Error, title, description, MessageButtons::Ok).await;
}

/// Resolves to true if the user pressed Ok.
pub async fn confirm(title: String, description: String) -> bool {
    let result = show(
        MessageLevel::Warning,
        title,
        description,
        MessageButtons::OkCancel,
    )
    .await;
    matches!(result, MessageDialogResult::Ok | MessageDialogResult::Yes)
}
