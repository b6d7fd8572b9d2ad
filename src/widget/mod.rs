use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
    task::JoinHandle,
};

use crate::{
    chat::{Concierge, SessionEvent},
    config::structure::WidgetConfig,
};

mod render;

/// Terminal front end for a mounted [`Concierge`].
///
/// Reads lines from stdin and prints transcript updates as the session announces them.
/// `/open` and `/close` toggle the chat panel, `/quit` unmounts.
pub struct ChatWidget {
    concierge: Concierge,
    config: WidgetConfig,
    open: Arc<AtomicBool>,
}

enum Input<'a> {
    Open,
    Close,
    Quit,
    Text(&'a str),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(line: &'a str) -> Self {
        match line.trim() {
            "/open" => Input::Open,
            "/close" => Input::Close,
            "/quit" | "/exit" => Input::Quit,
            _ => Input::Text(line),
        }
    }
}

impl ChatWidget {
    pub fn new(concierge: Concierge, config: WidgetConfig) -> Self {
        let open = Arc::new(AtomicBool::new(config.start_open));

        Self {
            concierge,
            config,
            open,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if self.open.load(Ordering::Relaxed) {
            self.render_panel().await;
        } else {
            println!("{}", render::launcher(&self.config));
        }

        let renderer = self.spawn_renderer().await;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            match Input::from(line.as_str()) {
                Input::Quit => break,
                Input::Open => {
                    if !self.open.swap(true, Ordering::Relaxed) {
                        self.render_panel().await;
                    }
                }
                Input::Close => {
                    self.open.store(false, Ordering::Relaxed);
                    println!("{}", render::launcher(&self.config));
                }
                Input::Text(text) => {
                    if !self.open.load(Ordering::Relaxed) {
                        continue;
                    }
                    // the turn resolves in the background, the renderer prints the result
                    let _ = self.concierge.submit(text).await;
                }
            }
        }

        renderer.abort();
        self.concierge.unmount();

        Ok(())
    }

    async fn render_panel(&self) {
        let session = self.concierge.read().await;

        println!(
            "{}",
            render::header(&self.config, self.concierge.gateway().business())
        );
        for message in session.messages() {
            println!("{}", render::message(message));
        }
        if session.awaiting_reply() {
            println!("{}", render::pending(&self.config));
        }
    }

    async fn spawn_renderer(&self) -> JoinHandle<()> {
        let mut events = self.concierge.subscribe().await;
        let open = self.open.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("renderer fell behind, skipped {skipped} events");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                if !open.load(Ordering::Relaxed) {
                    continue;
                }

                match event {
                    SessionEvent::MessageAppended(message) => {
                        println!("{}", render::message(&message))
                    }
                    SessionEvent::AwaitingReply(true) => println!("{}", render::pending(&config)),
                    SessionEvent::AwaitingReply(false) => {}
                }
            }
        })
    }
}
