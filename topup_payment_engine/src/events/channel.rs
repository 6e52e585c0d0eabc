//! Simple stateless event channel.
//!
//! A handler owns the receiving end of an mpsc channel and a callback; producers are cheap clones of the sending
//! end. Each received event is handled on its own task, so a slow push-notification call never delays the next
//! webhook's side effects. When the last producer is dropped the handler drains and shuts down.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::sync::mpsc;

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, receiver) = mpsc::channel(buffer_size);
        Self { listener: receiver, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    pub async fn start_handler(mut self) {
        debug!("📬️ Starting event handler");
        // The internal sender must go away so that dropping the last producer closes the channel.
        drop(self.sender);
        while let Some(ev) = self.listener.recv().await {
            trace!("📬️ Dispatching event to handler task");
            let handler = Arc::clone(&self.handler);
            tokio::spawn(async move {
                (handler)(ev).await;
                trace!("📬️ Event handled");
            });
        }
        debug!("📬️ Event handler has shut down");
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to send event: {e}");
        }
    }
}
