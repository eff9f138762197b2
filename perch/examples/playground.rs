//! Interactive playground: a selection list under a sticky section header.
//!
//! Up/Down/Home/End move focus, Space toggles, PageUp/PageDown scroll the
//! section, q quits. Logs go to `playground.log`.

use std::fs::File;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, queue, style, terminal};
use futures::StreamExt;
use perch::prelude::*;
use perchdom::{DeclarationEnvironment, Length, Position};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

const VIEWPORT_TOP: i32 = 2;
const VIEWPORT_HEIGHT: i32 = 12;
const SCROLL_STEP: i32 = 3;

const MAILBOXES: [&str; 18] = [
    "Inbox", "Starred", "Snoozed", "Important", "Sent", "Scheduled", "Drafts", "All mail",
    "Spam", "Trash", "Receipts", "Travel", "Family", "Work", "Newsletters", "Archive",
    "Notes", "Later",
];

#[derive(Debug, Error)]
enum PlaygroundError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

struct Scene {
    container: Element,
    scrollable: Scrollable,
    region: Element,
    header: StickyHeader,
    list: SelectionList<String>,
    scrolled: i32,
}

impl Scene {
    fn new(width: i32) -> Self {
        let list = SelectionList::new().with_options(
            MAILBOXES
                .iter()
                .map(|name| ListOption::new(name.to_string()))
                .collect(),
        );
        if let Some(archive) = list.get(MAILBOXES.len() - 3) {
            archive.set_disabled(true);
        }

        let heading = Element::box_()
            .id("heading")
            .style(
                StyleSet::new()
                    .position(Position::Relative)
                    .width(Length::Px(width)),
            )
            .offset(Rect::new(0, 0, width, 1));
        let region = Element::box_()
            .id("mailboxes")
            .bounds(Rect::new(0, VIEWPORT_TOP + 3, width, MAILBOXES.len() as i32 + 1))
            .child(heading.clone());
        let container = Element::box_()
            .id("viewport")
            .offset(Rect::new(0, VIEWPORT_TOP, width, VIEWPORT_HEIGHT))
            .client_width(width)
            .child(region.clone());
        let scrollable = Scrollable::new(container.clone());

        let platform = Platform::new(DeclarationEnvironment::without_sticky());
        let header = StickyHeader::attach(heading, &scrollable, StickyHeaderConfig::new(), &platform);

        Self {
            container,
            scrollable,
            region,
            header,
            list,
            scrolled: 0,
        }
    }

    fn scroll_by(&mut self, dy: i32) {
        let max = self.region.bounding_rect().height;
        let next = (self.scrolled + dy).clamp(0, max);
        let dy = next - self.scrolled;
        if dy != 0 {
            self.scrolled = next;
            self.scrollable
                .scroll_content_by(&[self.region.clone()], dy, Instant::now());
        }
    }

    fn resize(&self, width: i32) {
        self.container.set_client_width(width);
        self.scrollable.emit_resize();
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            style::Print("arrows move, space toggles, PgUp/PgDn scroll, q quits")
        )?;

        let bottom = VIEWPORT_TOP + VIEWPORT_HEIGHT;
        let visible = |y: i32| (VIEWPORT_TOP..bottom).contains(&y);
        let region = self.region.bounding_rect();

        for (i, option) in self.list.options().iter().enumerate() {
            let y = region.top() + 1 + i as i32;
            if !visible(y) {
                continue;
            }
            let pointer = if option.has_focus() { ">" } else { " " };
            let mark = match (option.is_selected(), option.is_disabled()) {
                (_, true) => "[-]",
                (true, false) => "[x]",
                (false, false) => "[ ]",
            };
            let label = option.with_value(String::clone).unwrap_or_default();
            queue!(
                out,
                cursor::MoveTo(0, y as u16),
                style::Print(format!("{pointer} {mark} {label}"))
            )?;
        }

        let header_y = match self.header.state() {
            StickyState::Stuck => VIEWPORT_TOP,
            StickyState::Unstuck => region.bottom() - 1,
            StickyState::Reset => region.top(),
        };
        if visible(header_y) {
            queue!(
                out,
                cursor::MoveTo(0, header_y as u16),
                style::Print(format!("== Mailboxes ({:?}) ==", self.header.state()))
            )?;
        }

        queue!(
            out,
            cursor::MoveTo(0, (bottom + 1) as u16),
            style::Print(format!("selected: {}", self.list.selected_values().join(", ")))
        )?;
        out.flush()
    }
}

async fn event_loop(scene: &mut Scene, out: &mut io::Stdout) -> Result<(), PlaygroundError> {
    let mut events = EventStream::new();
    let mut ticks = tokio::time::interval(Duration::from_millis(5));

    scene.list.focus();
    scene.draw(out)?;

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                if scene.header.poll(Instant::now()) {
                    scene.draw(out)?;
                }
            }
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                match event? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => break,
                            KeyCode::PageDown => scene.scroll_by(SCROLL_STEP),
                            KeyCode::PageUp => scene.scroll_by(-SCROLL_STEP),
                            _ => {
                                let mut event = KeyEvent::from(key);
                                scene.list.keydown(&mut event);
                            }
                        }
                        scene.draw(out)?;
                    }
                    Event::Resize(width, _) => {
                        scene.resize(i32::from(width));
                        scene.draw(out)?;
                    }
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

async fn run() -> Result<(), PlaygroundError> {
    let log_file = File::create("playground.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let (width, _) = terminal::size()?;
    let mut scene = Scene::new(i32::from(width));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut scene, &mut stdout).await;

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("playground: {err}");
    }
}
