use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, OrderReconciledEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub order_reconciled_producers: Vec<EventProducer<OrderReconciledEvent>>,
}

pub struct EventHandlers {
    pub on_order_reconciled: Option<EventHandler<OrderReconciledEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_order_reconciled = hooks.on_order_reconciled.map(|f| EventHandler::new(buffer_size, f));
        Self { on_order_reconciled }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_order_reconciled {
            result.order_reconciled_producers.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_order_reconciled {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_order_reconciled: Option<Handler<OrderReconciledEvent>>,
}

impl EventHooks {
    pub fn on_order_reconciled<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderReconciledEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_reconciled = Some(Arc::new(f));
        self
    }
}
