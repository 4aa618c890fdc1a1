mod overlays;
mod page;
mod terminal;

use std::fs::File;
use std::sync::{Arc, Mutex};

use crossterm::event::{Event, EventStream};
use futures::{StreamExt, future};
use simplelog::{Config, LevelFilter, WriteLogger};
use veil::prelude::*;
use veil_dom::key_press;

use crate::page::ListingsPage;
use crate::terminal::TerminalGuard;

fn host_event(event: std::io::Result<Event>) -> Option<HostEvent> {
    match event {
        Ok(Event::Key(key)) => key_press(&key).map(|(key, modifiers)| HostEvent::Key(key, modifiers)),
        Ok(Event::Resize(..)) => Some(HostEvent::Redraw),
        Ok(_) => None,
        Err(e) => {
            log::error!("input error: {}", e);
            None
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_file = File::create("veil-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let registry = Registry::new();
    let focus = Arc::new(Mutex::new(FocusState::new()));
    let scroll_lock = Arc::new(ScrollLockFlag::new());
    let mut host = Host::new(registry, focus, scroll_lock.clone());

    let terminal = TerminalGuard::new().expect("Failed to initialize terminal");
    let mut page = ListingsPage::new(terminal, scroll_lock);

    let events = EventStream::new().filter_map(|event| future::ready(host_event(event)));
    if let Err(e) = host.run(Box::pin(events), &mut page).await {
        log::error!("host stopped: {}", e);
        drop(page);
        eprintln!("Error: {}", e);
    }
}
