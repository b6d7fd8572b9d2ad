use colored::Colorize;

use crate::{
    business::BusinessContext,
    chat::{Message, MessageRole},
    config::structure::WidgetConfig,
};

pub fn header(widget: &WidgetConfig, business: &BusinessContext) -> String {
    format!(
        "{}\n{} {}  {} {}\n",
        widget.title.bold().green(),
        "call".dimmed(),
        business.tel_link(),
        "whatsapp".dimmed(),
        business.chat_link()
    )
}

pub fn launcher(widget: &WidgetConfig) -> String {
    format!(
        "[{}] type /open to chat",
        widget.launcher_label.bold().yellow()
    )
}

pub fn message(message: &Message) -> String {
    let time = message.sent_at().format("%H:%M");

    match message.role() {
        MessageRole::User => format!(
            "{} {} {}",
            time.to_string().dimmed(),
            "you >".bold().blue(),
            message.text()
        ),
        MessageRole::Assistant => format!(
            "{} {} {}",
            time.to_string().dimmed(),
            "caddy >".bold().green(),
            message.text()
        ),
    }
}

pub fn pending(widget: &WidgetConfig) -> String {
    format!("{} is typing...", widget.title)
        .italic()
        .dimmed()
        .to_string()
}
