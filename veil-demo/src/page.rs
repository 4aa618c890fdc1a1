//! The listings page behind the overlays.

use std::io;
use std::sync::Arc;

use veil::layers::SPACER_ORDER;
use veil::prelude::*;
use veil_dom::{display_width, render_lines};

use crate::overlays::{FilterSheet, ShareSheet, WelcomeDialog};
use crate::terminal::TerminalGuard;

const LISTINGS: &[&str] = &[
    "Oak bookshelf, barely used",
    "Kids bike (16\")",
    "Box of seed potatoes",
    "Espresso machine, needs descaling",
    "Garden chairs x4",
    "Sourdough starter",
    "Winter tyres 205/55 R16",
    "Board games bundle",
    "Standing desk frame",
    "Houseplants: monstera cuttings",
];

const HELP: &str = "d dialog  p share  f filters  t/b/e toast  x dismiss  j/k scroll  q quit";

pub struct ListingsPage {
    terminal: TerminalGuard,
    scroll_lock: Arc<ScrollLockFlag>,
    scroll: usize,
    exit: bool,
}

impl ListingsPage {
    pub fn new(terminal: TerminalGuard, scroll_lock: Arc<ScrollLockFlag>) -> Self {
        Self {
            terminal,
            scroll_lock,
            scroll: 0,
            exit: false,
        }
    }

    fn open(&self, registry: &Registry, key: Key) -> Result<(), OverlayError> {
        let listing = LISTINGS[self.scroll].to_string();
        match key {
            Key::Char('d') => {
                registry.dialogs().open(
                    WelcomeDialog,
                    "welcome",
                    Props::new().with("message", "Give things a second life."),
                )?;
            }
            Key::Char('p') => {
                registry.panels().open(
                    ShareSheet {
                        registry: registry.clone(),
                        listing,
                    },
                    "share",
                    PanelProps::new(),
                )?;
            }
            Key::Char('f') => {
                registry
                    .panels()
                    .open(FilterSheet, "filters", PanelProps::new().scrim(Scrim::None))?;
            }
            Key::Char('t') => {
                registry
                    .notifications()
                    .toast(Toast::info(format!("Saved \"{listing}\"")), NotificationProps::top())?;
            }
            Key::Char('b') => {
                registry
                    .notifications()
                    .toast("Chat reconnected", NotificationProps::bottom())?;
            }
            Key::Char('e') => {
                registry.notifications().toast(
                    Toast::error("Upload failed"),
                    NotificationProps::top().auto_hide(false),
                )?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Page for ListingsPage {
    type Error = io::Error;

    fn on_key(&mut self, key: Key, _modifiers: Modifiers, trapped: bool, registry: &Registry) {
        if key == Key::Char('q') {
            self.exit = true;
            return;
        }

        match key {
            Key::Char('j') | Key::Down if !self.scroll_lock.is_locked() => {
                self.scroll = (self.scroll + 1).min(LISTINGS.len() - 1);
            }
            Key::Char('k') | Key::Up if !self.scroll_lock.is_locked() => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ if trapped => {}
            _ => {
                if let Err(e) = self.open(registry, key) {
                    log::error!("open failed: {}", e);
                }
            }
        }
    }

    fn draw(&mut self, frame: &Frame, focused: Option<&str>) -> io::Result<()> {
        let (width, height) = self.terminal.size()?;
        let cols = usize::from(width);
        let mut rows: Vec<(u16, u16, String)> = Vec::new();

        rows.push((0, 2, "Neighbourhood market".to_string()));
        rows.push((1, 2, HELP.to_string()));
        if frame.scroll_locked {
            rows.push((2, 2, "(scroll locked)".to_string()));
        }
        for (row, (index, listing)) in (4..height).zip(LISTINGS.iter().enumerate()) {
            let marker = if index == self.scroll { ">" } else { " " };
            rows.push((row, 2, format!("{marker} {listing}")));
        }

        for panel in &frame.panels {
            let lines = render_lines(panel, cols.saturating_sub(4), focused);
            let top = height.saturating_sub(lines.len() as u16 + 1);
            place(&mut rows, top, 2, &lines);
        }

        for dialog in &frame.dialogs {
            let lines = render_lines(dialog, cols.saturating_sub(8), focused);
            let top = height.saturating_sub(lines.len() as u16) / 2;
            let boxed: Vec<String> = lines.iter().map(|line| format!("│ {line}")).collect();
            place(&mut rows, top, 4, &boxed);
        }

        let mut top_row = 0;
        let mut bottom_lines = Vec::new();
        for child in frame.notifications.ordered_children() {
            if child.order == SPACER_ORDER {
                continue;
            }
            let lines = render_lines(child, cols / 2, None);
            if child.order < SPACER_ORDER {
                for line in lines {
                    let column = width.saturating_sub(display_width(&line) as u16 + 1);
                    rows.push((top_row, column, line));
                    top_row += 1;
                }
            } else {
                bottom_lines.extend(lines);
            }
        }
        let mut row = height.saturating_sub(bottom_lines.len() as u16);
        for line in bottom_lines {
            let column = width.saturating_sub(display_width(&line) as u16 + 1);
            rows.push((row, column, line));
            row += 1;
        }

        self.terminal.draw(&rows)
    }

    fn should_exit(&self) -> bool {
        self.exit
    }
}

fn place(rows: &mut Vec<(u16, u16, String)>, top: u16, column: u16, lines: &[String]) {
    for (offset, line) in lines.iter().enumerate() {
        rows.push((top + offset as u16, column, line.clone()));
    }
}
